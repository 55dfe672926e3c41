use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Invalid base64 data: {0}")]
    InvalidBase64(String),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;
