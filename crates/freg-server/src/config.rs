use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use figment::providers::Serialized;
use figment::Figment;
use freg_sdk::{env_layer, toml_layer};
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Environment variables read into the `[server]` table.
pub const SERVER_ENV: [&str; 3] = ["PORT", "MAX_BODY_BYTES", "REQUEST_TIMEOUT_SECS"];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Upper bound on request bodies. Base64 inflates uploads by a third.
    pub max_body_bytes: usize,
    /// Per-request deadline; `None` lets requests run until the client
    /// goes away. Zero is rejected.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            request_timeout_secs: None,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Defaults, then the `[server]` table of `file` (if any), then
    /// `PORT`, `MAX_BODY_BYTES` and `REQUEST_TIMEOUT_SECS`.
    pub fn figment(file: Option<&Path>) -> ServerResult<Figment> {
        let mut figment = Figment::new().merge(Serialized::default("server", Self::default()));
        if let Some(path) = file {
            figment = figment.merge(toml_layer(path).map_err(|e| ServerError::Config(e.to_string()))?);
        }
        Ok(figment.merge(env_layer(&SERVER_ENV, "server")))
    }

    /// Extract and check the `[server]` table.
    pub fn from_figment(figment: &Figment) -> ServerResult<Self> {
        let config: Self = figment
            .extract_inner("server")
            .map_err(|e| ServerError::Config(e.to_string()))?;
        config.validate()
    }

    pub fn load(file: Option<&Path>) -> ServerResult<Self> {
        Self::from_figment(&Self::figment(file)?)
    }

    pub fn validate(self) -> ServerResult<Self> {
        if self.request_timeout_secs == Some(0) {
            return Err(ServerError::Config(
                "REQUEST_TIMEOUT_SECS must be at least 1; leave it unset for no deadline".into(),
            ));
        }
        if self.max_body_bytes == 0 {
            return Err(ServerError::Config("MAX_BODY_BYTES must be at least 1".into()));
        }
        Ok(self)
    }
}
