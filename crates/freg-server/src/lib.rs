//! HTTP server for the file registry.
//!
//! Exposes the registry over JSON:
//! - `POST /v1/files` with `{filePath, file}` (file is base64) returns
//!   `{cid, txHash}`
//! - `GET /v1/files?filePath=...` returns `{cid}`
//! - `GET /v1/health` and `GET /v1/info`
//!
//! Every error response is `{"error": "<message>"}`: 400 for malformed
//! requests, 500 for content store and ledger failures, 504 when the
//! per-request deadline elapses.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::{ServerConfig, DEFAULT_MAX_BODY_BYTES, DEFAULT_PORT, SERVER_ENV};
pub use error::{ApiError, ServerError, ServerResult};
pub use router::build_router;
pub use server::FregServer;
pub use state::AppState;
