//! Cryptographic primitives for the file registry.
//!
//! Provides the transaction signer that authorizes mutating ledger calls
//! (secp256k1 keys, EIP-155 chain binding) and a BLAKE3 content hasher used
//! by the in-memory content store and ledger.
//!
//! All crypto operations wrap established libraries.

pub mod hasher;
pub mod identity;
pub mod signer;
pub mod transaction;

pub use hasher::{raw_content_id, ContentHasher};
pub use identity::{SignerIdentity, DEFAULT_CHAIN_ID};
pub use signer::{SignerError, SignerParams, TransactionSigner};
pub use transaction::{LegacyCall, SignedTransaction};
