use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use freg_types::{ContentId, TransactionRef};

use crate::error::{ProtocolError, ProtocolResult};

/// Body of `POST /v1/files`.
///
/// Both fields default to empty so a missing field is reported by the
/// handler's validation rather than as a JSON error.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadRequest {
    #[serde(rename = "filePath", default)]
    pub file_path: String,
    /// File contents, standard base64 with padding.
    #[serde(rename = "file", default)]
    pub file: String,
}

impl UploadRequest {
    pub fn new(file_path: impl Into<String>, content: &[u8]) -> Self {
        Self {
            file_path: file_path.into(),
            file: STANDARD.encode(content),
        }
    }

    /// Decode the base64 file body.
    pub fn decode_file(&self) -> ProtocolResult<Vec<u8>> {
        STANDARD
            .decode(self.file.as_bytes())
            .map_err(|e| ProtocolError::InvalidBase64(e.to_string()))
    }
}

/// Body of a successful upload.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadResponse {
    pub cid: ContentId,
    #[serde(rename = "txHash")]
    pub tx_hash: TransactionRef,
}

/// Query string of `GET /v1/files`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ResolveQuery {
    #[serde(rename = "filePath", default)]
    pub file_path: String,
}

/// Body of a successful resolve. `cid` is empty when the path has no record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolveResponse {
    pub cid: ContentId,
}

/// Body of every error response.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
