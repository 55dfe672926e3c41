//! Ledger binding for the file registry.
//!
//! The ledger is an Ethereum-compatible node hosting a `FileRegistry`
//! contract that maps path strings to CID strings. This crate provides:
//! - [`ContractBinding`]: the parsed contract interface (ABI), contract
//!   address and RPC endpoint, loaded once and shared read-only
//! - [`JsonRpcClient`]: a minimal Ethereum JSON-RPC 2.0 client
//! - the [`LedgerBinding`] trait boundary with two typed operations,
//!   `save` (signed, state-mutating) and `get` (read-only)
//! - [`EthLedger`], the network-backed implementation
//! - [`InMemoryLedger`], a last-write-wins map for tests and embedding
//!
//! The binding does not distinguish a path that was never saved from one
//! saved with an empty CID: both read back as [`ContentId::unset`].
//!
//! [`ContentId::unset`]: freg_types::ContentId::unset

pub mod abi;
pub mod error;
pub mod eth;
pub mod memory;
pub mod rpc;
pub mod traits;

pub use abi::{ContractBinding, BUNDLED_ABI};
pub use error::{LedgerError, LedgerResult};
pub use eth::EthLedger;
pub use memory::InMemoryLedger;
pub use rpc::{JsonRpcClient, RpcError};
pub use traits::LedgerBinding;
