use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use freg_crypto::{ContentHasher, SignerParams};
use freg_types::{ContentId, PathKey, TransactionRef};

use crate::error::LedgerResult;
use crate::traits::LedgerBinding;

/// In-memory registry contract for tests, local demos, and embedding.
///
/// Behaves like the deployed contract: saves overwrite (last write wins),
/// unknown paths read back as the unset CID, and every accepted save yields a
/// distinct transaction hash. Saves are visible to reads immediately, as if
/// every transaction were mined at once.
pub struct InMemoryLedger {
    records: RwLock<HashMap<PathKey, ContentId>>,
    sequence: AtomicU64,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            sequence: AtomicU64::new(0),
        }
    }

    /// Number of paths with a record.
    pub fn len(&self) -> usize {
        self.records.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().expect("lock poisoned").is_empty()
    }

    /// Number of accepted `save` calls.
    pub fn save_count(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerBinding for InMemoryLedger {
    async fn save(
        &self,
        auth: &SignerParams,
        path: &PathKey,
        cid: &ContentId,
    ) -> LedgerResult<TransactionRef> {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let tx = ContentHasher::TRANSACTION.transaction_ref(&[
            auth.address().as_slice(),
            &auth.chain_id().to_be_bytes(),
            &seq.to_be_bytes(),
            path.as_str().as_bytes(),
            cid.as_str().as_bytes(),
        ]);

        self.records
            .write()
            .expect("lock poisoned")
            .insert(path.clone(), cid.clone());

        tracing::debug!(path = %path, cid = %cid, tx = %tx, "recorded path in memory ledger");
        Ok(tx)
    }

    async fn get(&self, path: &PathKey) -> LedgerResult<ContentId> {
        let records = self.records.read().expect("lock poisoned");
        Ok(records.get(path).cloned().unwrap_or_else(ContentId::unset))
    }
}

impl std::fmt::Debug for InMemoryLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryLedger")
            .field("record_count", &self.len())
            .field("save_count", &self.save_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freg_crypto::{SignerIdentity, TransactionSigner};

    const KEY: &str = "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";

    fn auth() -> SignerParams {
        TransactionSigner::new(SignerIdentity::from_hex(KEY, 1338).unwrap())
            .authorize()
            .unwrap()
    }

    fn path(p: &str) -> PathKey {
        PathKey::new(p).unwrap()
    }

    fn cid(c: &str) -> ContentId {
        ContentId::new(c).unwrap()
    }

    #[tokio::test]
    async fn save_then_get() {
        let ledger = InMemoryLedger::new();
        let tx = ledger
            .save(&auth(), &path("some/file/path"), &cid("QmA"))
            .await
            .unwrap();
        assert_eq!(tx.as_str().len(), 66);
        assert_eq!(ledger.get(&path("some/file/path")).await.unwrap(), cid("QmA"));
    }

    #[tokio::test]
    async fn later_save_replaces_cid() {
        let ledger = InMemoryLedger::new();
        let p = path("some/file/path/check/replace");
        ledger.save(&auth(), &p, &cid("QmFirst")).await.unwrap();
        ledger.save(&auth(), &p, &cid("QmSecond")).await.unwrap();
        assert_eq!(ledger.get(&p).await.unwrap(), cid("QmSecond"));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.save_count(), 2);
    }

    #[tokio::test]
    async fn unknown_path_reads_unset() {
        let ledger = InMemoryLedger::new();
        let got = ledger.get(&path("/unknown/path.txt")).await.unwrap();
        assert!(got.is_unset());
    }

    #[tokio::test]
    async fn unset_and_saved_empty_are_indistinguishable() {
        let ledger = InMemoryLedger::new();
        let p = path("/set/to/empty");
        ledger.save(&auth(), &p, &ContentId::unset()).await.unwrap();
        assert_eq!(
            ledger.get(&p).await.unwrap(),
            ledger.get(&path("/never/set")).await.unwrap()
        );
    }

    #[tokio::test]
    async fn identical_saves_get_distinct_hashes() {
        let ledger = InMemoryLedger::new();
        let a = ledger.save(&auth(), &path("p"), &cid("c")).await.unwrap();
        let b = ledger.save(&auth(), &path("p"), &cid("c")).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn trailing_slash_is_a_different_record() {
        let ledger = InMemoryLedger::new();
        ledger.save(&auth(), &path("/docs/"), &cid("QmDir")).await.unwrap();
        assert!(ledger.get(&path("/docs")).await.unwrap().is_unset());
    }
}
