//! Content-addressed store clients for the file registry.
//!
//! The registry never interprets file contents: it hands raw bytes to a
//! content-addressable store and keeps the content identifier (CID) the store
//! returns. This crate defines that boundary and its backends.
//!
//! # Storage Backends
//!
//! All backends implement the [`ContentStore`] trait:
//!
//! - [`IpfsContentStore`] -- Kubo-compatible HTTP RPC client (`/api/v0/add`)
//! - [`InMemoryContentStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Identical bytes always produce the identical CID.
//! 2. Every `add` issues a write; nothing is cached client-side.
//! 3. No retries. Retry policy belongs to the caller.
//! 4. Unreachable store and store-side rejection are distinct errors.

pub mod error;
pub mod ipfs;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use ipfs::IpfsContentStore;
pub use memory::InMemoryContentStore;
pub use traits::ContentStore;
