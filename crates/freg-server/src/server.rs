use std::sync::Arc;

use freg_sdk::{Registry, RegistryConfig};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::router::build_router;
use crate::state::AppState;

/// File registry HTTP server.
pub struct FregServer {
    config: ServerConfig,
    state: AppState,
}

impl FregServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Connect to the content store and ledger described by `registry`.
    ///
    /// Key, chain id and contract interface problems are reported here,
    /// before any request is served.
    pub fn connect(config: ServerConfig, registry: &RegistryConfig) -> ServerResult<Self> {
        let config = config.validate()?;
        let client = Registry::connect(registry)?.with_deadline(config.request_timeout());
        let state = AppState::from_config(Arc::new(client), registry);
        Ok(Self::new(config, state))
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone(), self.config.max_body_bytes)
    }

    /// Serve requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let addr = self.config.bind_addr();
        let app = self.router();
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(
            %addr,
            contract = %self.state.info().contract_address,
            chain_id = self.state.info().chain_id,
            store = %self.state.info().content_store,
            "file registry server listening"
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("file registry server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
