use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use freg_crypto::raw_content_id;
use freg_types::ContentId;

use crate::error::StoreResult;
use crate::traits::ContentStore;

/// In-memory, HashMap-based content store.
///
/// Intended for tests and embedding. CIDs are CIDv1 raw BLAKE3 identifiers,
/// so identical bytes always map to the same CID. Blobs are held behind a
/// `RwLock` and cloned on read.
pub struct InMemoryContentStore {
    blobs: RwLock<HashMap<ContentId, Vec<u8>>>,
    writes: AtomicU64,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
            writes: AtomicU64::new(0),
        }
    }

    /// Read back a blob by CID.
    pub fn get(&self, cid: &ContentId) -> Option<Vec<u8>> {
        self.blobs.read().expect("lock poisoned").get(cid).cloned()
    }

    pub fn contains(&self, cid: &ContentId) -> bool {
        self.blobs.read().expect("lock poisoned").contains_key(cid)
    }

    /// Number of distinct blobs stored.
    pub fn len(&self) -> usize {
        self.blobs.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.read().expect("lock poisoned").is_empty()
    }

    /// Number of `add` calls served, including duplicates.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn add(&self, content: &[u8]) -> StoreResult<ContentId> {
        let cid = raw_content_id(content);
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.blobs
            .write()
            .expect("lock poisoned")
            .entry(cid.clone())
            .or_insert_with(|| content.to_vec());
        tracing::debug!(cid = %cid, bytes = content.len(), "stored blob in memory");
        Ok(cid)
    }

    fn endpoint(&self) -> &str {
        "memory"
    }
}

impl std::fmt::Debug for InMemoryContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryContentStore")
            .field("blob_count", &self.len())
            .field("write_count", &self.write_count())
            .finish()
    }
}
