use async_trait::async_trait;
use freg_crypto::SignerParams;
use freg_types::{ContentId, PathKey, TransactionRef};

use crate::error::LedgerResult;

/// Typed boundary over the registry contract.
///
/// Implementations are shared read-only across concurrent requests and hold
/// no per-request state. Neither operation retries.
#[async_trait]
pub trait LedgerBinding: Send + Sync {
    /// Submit `save(path, cid)` signed with `auth`.
    ///
    /// Returns once the node accepts the transaction; acceptance is not
    /// finality. Any failure is [`LedgerError::Submission`].
    ///
    /// [`LedgerError::Submission`]: crate::error::LedgerError::Submission
    async fn save(
        &self,
        auth: &SignerParams,
        path: &PathKey,
        cid: &ContentId,
    ) -> LedgerResult<TransactionRef>;

    /// Read the CID recorded for `path`.
    ///
    /// A path with no record yields [`ContentId::unset`], indistinguishable
    /// from a path saved with an empty CID. Any failure is
    /// [`LedgerError::Query`].
    ///
    /// [`LedgerError::Query`]: crate::error::LedgerError::Query
    async fn get(&self, path: &PathKey) -> LedgerResult<ContentId>;
}
