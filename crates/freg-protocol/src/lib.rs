//! HTTP wire protocol for the file registry.
//!
//! Defines the endpoint paths and the JSON bodies exchanged between clients
//! and the registry server. Field names are camelCase on the wire
//! (`filePath`, `txHash`).

pub mod endpoint;
pub mod error;
pub mod message;

pub use endpoint::{endpoints, HealthResponse, InfoResponse, PROTOCOL_VERSION};
pub use error::{ProtocolError, ProtocolResult};
pub use message::{ErrorResponse, ResolveQuery, ResolveResponse, UploadRequest, UploadResponse};
