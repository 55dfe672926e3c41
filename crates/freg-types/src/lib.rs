//! Foundation types for the file registry.
//!
//! Every other `freg` crate depends on `freg-types`. The types here are thin,
//! validated wrappers around the opaque strings exchanged with the content
//! store and the ledger.
//!
//! # Key Types
//!
//! - [`PathKey`]: Caller-chosen logical file name, the ledger record key
//! - [`ContentId`]: Content identifier produced by the content store
//! - [`TransactionRef`]: Reference to a ledger transaction accepted by a node

pub mod content;
pub mod error;
pub mod path;
pub mod transaction;

pub use content::ContentId;
pub use error::TypeError;
pub use path::PathKey;
pub use transaction::TransactionRef;
