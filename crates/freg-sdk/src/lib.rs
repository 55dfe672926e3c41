//! High-level SDK for the file registry.
//!
//! [`Registry`] is the main entry point: `upload` stores bytes in a content
//! store and records the CID against a path in the ledger contract,
//! `resolve` reads the CID back. Configuration is layered by
//! [`RegistrySettings::load`] and validated once up front by
//! [`RegistrySettings::validate`].

pub mod config;
pub mod error;
pub mod registry;

pub use config::{
    env_layer, load_dotenv, toml_layer, ConfigError, RegistryConfig, RegistrySettings, REGISTRY_ENV,
};
pub use error::{ErrorKind, RegistryError, RegistryResult};
pub use registry::{Registry, UploadReceipt};

// Re-export key types
pub use freg_crypto::{SignerIdentity, TransactionSigner};
pub use freg_ledger::{InMemoryLedger, LedgerBinding, LedgerError};
pub use freg_store::{ContentStore, InMemoryContentStore, StoreError};
pub use freg_types::{ContentId, PathKey, TransactionRef};
