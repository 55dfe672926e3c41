use std::sync::Arc;

use freg_protocol::{InfoResponse, PROTOCOL_VERSION};
use freg_sdk::{Registry, RegistryConfig};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<Registry>,
    info: Arc<InfoResponse>,
}

impl AppState {
    pub fn new(registry: Arc<Registry>, info: InfoResponse) -> Self {
        Self {
            registry,
            info: Arc::new(info),
        }
    }

    /// State for a registry built from `config`.
    pub fn from_config(registry: Arc<Registry>, config: &RegistryConfig) -> Self {
        let info = InfoResponse {
            name: "freg-server".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            protocol_version: PROTOCOL_VERSION,
            contract_address: config.contract_address.to_string(),
            chain_id: config.chain_id,
            content_store: registry.store_endpoint().to_string(),
        };
        Self::new(registry, info)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn info(&self) -> &InfoResponse {
        &self.info
    }
}
