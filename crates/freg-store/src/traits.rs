use async_trait::async_trait;
use freg_types::ContentId;

use crate::error::StoreResult;

/// Content-addressable store client.
///
/// All implementations must satisfy these invariants:
/// - Identical bytes produce the identical [`ContentId`].
/// - A returned CID is never empty.
/// - Failures are returned, never retried internally.
/// - Safe to share across concurrent requests (`Send + Sync`); a single
///   long-lived handle is reused for the life of the process.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store `content` and return its content identifier.
    ///
    /// Each call performs a store write, even for content already present.
    async fn add(&self, content: &[u8]) -> StoreResult<ContentId>;

    /// Human-readable endpoint or backend name, for logs.
    fn endpoint(&self) -> &str;
}
