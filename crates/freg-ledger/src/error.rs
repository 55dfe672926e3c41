/// Errors produced by ledger binding operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The node did not accept a mutating call. Causes (malformed call,
    /// insufficient funds, nonce conflict, unreachable node) are not
    /// distinguished.
    #[error("transaction submission failed: {0}")]
    Submission(String),

    /// A read-only call failed or its result could not be decoded.
    #[error("ledger query failed: {0}")]
    Query(String),

    /// The contract interface description is unusable.
    #[error("invalid contract interface: {0}")]
    Abi(String),

    /// The ledger client could not be constructed.
    #[error("failed to set up ledger client: {0}")]
    Setup(String),

    /// The contract interface file could not be read.
    #[error("failed to read contract interface {path}: {reason}")]
    AbiLoad { path: String, reason: String },
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
