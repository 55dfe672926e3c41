use std::time::Duration;

use freg_crypto::SignerError;
use freg_ledger::LedgerError;
use freg_store::StoreError;
use freg_types::TypeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("content store error: {0}")]
    Store(#[from] StoreError),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("signer error: {0}")]
    Signer(#[from] SignerError),

    #[error("request cancelled: deadline of {0:?} elapsed")]
    Cancelled(Duration),
}

impl From<TypeError> for RegistryError {
    fn from(e: TypeError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

/// Coarse classification of a [`RegistryError`], stable across backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    StoreUnavailable,
    StoreError,
    SubmissionError,
    QueryError,
    /// The contract interface could not be loaded or lacks the registry
    /// functions.
    BindingError,
    InvalidKey,
    ChainBindingError,
    Cancelled,
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Store(e) if e.is_unavailable() => ErrorKind::StoreUnavailable,
            Self::Store(_) => ErrorKind::StoreError,
            Self::Ledger(LedgerError::Submission(_)) => ErrorKind::SubmissionError,
            Self::Ledger(LedgerError::Query(_)) => ErrorKind::QueryError,
            Self::Ledger(
                LedgerError::Abi(_) | LedgerError::AbiLoad { .. } | LedgerError::Setup(_),
            ) => ErrorKind::BindingError,
            Self::Signer(SignerError::ChainBinding { .. }) => ErrorKind::ChainBindingError,
            Self::Signer(SignerError::InvalidKey(_) | SignerError::Signing(_)) => {
                ErrorKind::InvalidKey
            }
            Self::Cancelled(_) => ErrorKind::Cancelled,
        }
    }

    /// `true` when the request itself was at fault; everything else is a
    /// failure of an external system or of the service's own setup.
    pub fn is_caller_error(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_kinds_are_split_by_reachability() {
        let unreachable = RegistryError::from(StoreError::Unavailable {
            endpoint: "http://localhost:5001".into(),
            reason: "connection refused".into(),
        });
        assert_eq!(unreachable.kind(), ErrorKind::StoreUnavailable);

        let rejected = RegistryError::from(StoreError::Rejected {
            endpoint: "http://localhost:5001".into(),
            status: 500,
            message: "boom".into(),
        });
        assert_eq!(rejected.kind(), ErrorKind::StoreError);
    }

    #[test]
    fn ledger_kinds() {
        assert_eq!(
            RegistryError::from(LedgerError::Submission("nonce too low".into())).kind(),
            ErrorKind::SubmissionError
        );
        assert_eq!(
            RegistryError::from(LedgerError::Query("bad output".into())).kind(),
            ErrorKind::QueryError
        );
        assert_eq!(
            RegistryError::from(LedgerError::Abi("missing save".into())).kind(),
            ErrorKind::BindingError
        );
    }

    #[test]
    fn client_setup_failure_is_a_binding_error() {
        let e = RegistryError::from(LedgerError::Setup("failed to build HTTP client".into()));
        assert_eq!(e.kind(), ErrorKind::BindingError);
        assert!(!e.is_caller_error());
    }

    #[test]
    fn signer_kinds() {
        let e = RegistryError::from(SignerError::ChainBinding {
            chain_id: 0,
            reason: "zero".into(),
        });
        assert_eq!(e.kind(), ErrorKind::ChainBindingError);
        assert_eq!(
            RegistryError::from(SignerError::InvalidKey("short".into())).kind(),
            ErrorKind::InvalidKey
        );
    }

    #[test]
    fn only_invalid_input_is_a_caller_error() {
        assert!(RegistryError::from(TypeError::EmptyPath).is_caller_error());
        assert!(!RegistryError::Cancelled(Duration::from_secs(1)).is_caller_error());
        assert!(!RegistryError::from(LedgerError::Query("x".into())).is_caller_error());
    }
}
