use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use freg_protocol::{ErrorResponse, ProtocolError};
use freg_sdk::{ErrorKind, LedgerError, RegistryError};
use thiserror::Error;

pub const MISSING_FILE_PATH: &str = "Missing filePath query parameter";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("registry setup failed: {0}")]
    Registry(#[from] RegistryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Error returned by request handlers. Renders as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest { status: StatusCode, message: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl ApiError {
    pub fn missing_file_path() -> Self {
        Self::BadRequest {
            status: StatusCode::BAD_REQUEST,
            message: MISSING_FILE_PATH.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { status, .. } => *status,
            Self::Registry(e) => match e.kind() {
                ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
                ErrorKind::Cancelled => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::BadRequest { message, .. } => message.clone(),
            Self::Registry(RegistryError::Ledger(e)) => match e {
                LedgerError::Submission(_) => format!("contract save error: {e}"),
                LedgerError::Query(_) => format!("contract get error: {e}"),
                _ => format!("contract error: {e}"),
            },
            Self::Registry(e) => e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %message, "request rejected");
        }
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            StatusCode::PAYLOAD_TOO_LARGE
        } else {
            StatusCode::BAD_REQUEST
        };
        Self::BadRequest {
            status,
            message: format!("Failed to parse JSON: {}", rejection.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest {
            status: StatusCode::BAD_REQUEST,
            message: format!("Failed to parse query: {}", rejection.body_text()),
        }
    }
}

impl From<ProtocolError> for ApiError {
    fn from(e: ProtocolError) -> Self {
        Self::BadRequest {
            status: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        }
    }
}
