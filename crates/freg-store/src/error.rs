/// Errors from content store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached (connection refused, DNS, timeout).
    #[error("content store unavailable at {endpoint}: {reason}")]
    Unavailable { endpoint: String, reason: String },

    /// The store answered with a non-success status.
    #[error("content store {endpoint} returned {status}: {message}")]
    Rejected {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// The store answered, but the body could not be understood.
    #[error("malformed response from content store {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    /// The store reported success without a content identifier.
    #[error("content store returned an empty content identifier")]
    EmptyContentId,
}

impl StoreError {
    /// `true` when the store could not be reached at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
