use thiserror::Error;

/// Errors produced when constructing registry types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("path key must not be empty")]
    EmptyPath,

    #[error("content identifier must not be empty")]
    EmptyContentId,

    #[error("transaction reference must not be empty")]
    EmptyTransactionRef,
}
