//! Registry configuration.
//!
//! Settings are layered with `figment`: the `[registry]` table of an
//! optional TOML file, then the process environment. Empty environment
//! values count as unset. [`RegistrySettings::validate`] checks every field
//! at once and produces a [`RegistryConfig`], reporting all problems
//! together rather than stopping at the first.
//!
//! | field | env var | required |
//! |---|---|---|
//! | `contract_address` | `CONTRACT_ADDRESS` | yes |
//! | `eth_rpc_url` | `ETH_RPC_URL` | yes |
//! | `ipfs_url` | `IPFS_URL` | yes |
//! | `chain_id` | `CHAIN_ID` | no, defaults to 1 |
//! | `private_key` | `PRIVATE_KEY` | yes |
//! | `abi_path` | `ABI_PATH` | no, bundled ABI |

use std::path::{Path, PathBuf};

use alloy_primitives::Address;
use figment::providers::{Data, Env, Format, Toml};
use figment::Figment;
use freg_crypto::{SignerError, SignerIdentity, DEFAULT_CHAIN_ID};
use serde::Deserialize;
use thiserror::Error;
use url::Url;
use zeroize::Zeroizing;

/// Environment variables read into the `[registry]` table.
pub const REGISTRY_ENV: [&str; 6] = [
    "CONTRACT_ADDRESS",
    "ETH_RPC_URL",
    "IPFS_URL",
    "CHAIN_ID",
    "PRIVATE_KEY",
    "ABI_PATH",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("failed to load configuration: {0}")]
    Load(String),

    #[error("invalid configuration: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Load(e.to_string())
    }
}

/// A TOML file layer. Unlike a bare `Toml::file`, a path that does not
/// exist is an error: it was named explicitly.
pub fn toml_layer(path: &Path) -> Result<Data<Toml>, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::Read {
            path: path.display().to_string(),
            reason: "no such file".to_string(),
        });
    }
    Ok(Toml::file(path))
}

/// The unprefixed variables in `names`, nested under `table`.
/// Blank values are skipped so they never mask a lower layer.
pub fn env_layer(names: &[&str], table: &'static str) -> Env {
    Env::raw()
        .only(names)
        .filter(|key| {
            std::env::var(key.as_str().to_ascii_uppercase()).is_ok_and(|v| !v.trim().is_empty())
        })
        .map(move |key| format!("{table}.{}", key.as_str().to_ascii_lowercase()).into())
}

/// Load variables from the `.env` file at `path` into the process
/// environment. Variables that are already set keep their value. Returns
/// whether a file was loaded; a missing file is not an error.
pub fn load_dotenv(path: &Path) -> bool {
    match dotenvy::from_path(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "loaded environment file");
            true
        }
        Err(e) if e.not_found() => false,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to load environment file, continuing without it");
            false
        }
    }
}

/// Unvalidated registry settings. Every field is optional here.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    pub contract_address: Option<String>,
    pub eth_rpc_url: Option<String>,
    pub ipfs_url: Option<String>,
    pub chain_id: Option<u64>,
    pub private_key: Option<String>,
    pub abi_path: Option<String>,
}

#[derive(Deserialize)]
struct SettingsFile {
    #[serde(default)]
    registry: RegistrySettings,
}

impl RegistrySettings {
    /// The layered source: `file` (if any), then the environment.
    pub fn figment(file: Option<&Path>) -> Result<Figment, ConfigError> {
        let mut figment = Figment::new();
        if let Some(path) = file {
            figment = figment.merge(toml_layer(path)?);
        }
        Ok(figment.merge(env_layer(&REGISTRY_ENV, "registry")))
    }

    /// Extract the `[registry]` table from `figment`.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let file: SettingsFile = figment.extract()?;
        Ok(file.registry)
    }

    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment(file)?)
    }

    pub fn validate(&self) -> Result<RegistryConfig, ConfigError> {
        let mut problems = Vec::new();

        let contract_address = match present(&self.contract_address) {
            None => {
                problems.push("CONTRACT_ADDRESS is required".to_string());
                None
            }
            Some(raw) => match parse_address(raw) {
                Ok(addr) => Some(addr),
                Err(reason) => {
                    problems.push(format!("CONTRACT_ADDRESS {reason}"));
                    None
                }
            },
        };

        let eth_rpc_url = required_url("ETH_RPC_URL", present(&self.eth_rpc_url), &mut problems);
        let ipfs_url = required_url("IPFS_URL", present(&self.ipfs_url), &mut problems);

        let chain_id = self.chain_id.unwrap_or(DEFAULT_CHAIN_ID);

        let private_key = match present(&self.private_key) {
            None => {
                problems.push("PRIVATE_KEY is required".to_string());
                None
            }
            Some(raw) => {
                let digits = raw.strip_prefix("0x").unwrap_or(raw);
                if digits.len() == 64 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
                    Some(Zeroizing::new(digits.to_string()))
                } else {
                    // The value itself is never echoed back.
                    problems.push("PRIVATE_KEY must be 64 hex characters".to_string());
                    None
                }
            }
        };

        let abi_path = present(&self.abi_path).map(PathBuf::from);

        match (contract_address, eth_rpc_url, ipfs_url, private_key) {
            (Some(contract_address), Some(eth_rpc_url), Some(ipfs_url), Some(private_key))
                if problems.is_empty() =>
            {
                Ok(RegistryConfig {
                    contract_address,
                    eth_rpc_url,
                    ipfs_url,
                    chain_id,
                    private_key,
                    abi_path,
                })
            }
            _ => Err(ConfigError::Validation(problems)),
        }
    }
}

/// The trimmed value, or `None` when unset or blank.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_address(raw: &str) -> Result<Address, String> {
    let digits = raw
        .strip_prefix("0x")
        .ok_or_else(|| format!("must start with 0x, got {raw:?}"))?;
    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("must be 40 hex characters after 0x, got {raw:?}"));
    }
    let address: Address = raw
        .parse()
        .map_err(|e| format!("is not an address: {e}"))?;
    if address == Address::ZERO {
        return Err("must not be the zero address".to_string());
    }
    Ok(address)
}

fn required_url(name: &str, raw: Option<&str>, problems: &mut Vec<String>) -> Option<Url> {
    let Some(raw) = raw else {
        problems.push(format!("{name} is required"));
        return None;
    };
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url),
        Ok(url) => {
            problems.push(format!("{name} must use http or https, got {}", url.scheme()));
            None
        }
        Err(e) => {
            problems.push(format!("{name} is not a valid URL: {e}"));
            None
        }
    }
}

impl std::fmt::Debug for RegistrySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrySettings")
            .field("contract_address", &self.contract_address)
            .field("eth_rpc_url", &self.eth_rpc_url)
            .field("ipfs_url", &self.ipfs_url)
            .field("chain_id", &self.chain_id)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("abi_path", &self.abi_path)
            .finish()
    }
}

/// Validated registry configuration.
#[derive(Clone)]
pub struct RegistryConfig {
    pub contract_address: Address,
    pub eth_rpc_url: Url,
    pub ipfs_url: Url,
    pub chain_id: u64,
    private_key: Zeroizing<String>,
    /// Contract interface file; `None` selects the bundled ABI.
    pub abi_path: Option<PathBuf>,
}

impl RegistryConfig {
    /// Build the signer identity from the held key.
    pub fn signer_identity(&self) -> Result<SignerIdentity, SignerError> {
        SignerIdentity::from_hex(&self.private_key, self.chain_id)
    }
}

impl std::fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("contract_address", &self.contract_address)
            .field("eth_rpc_url", &self.eth_rpc_url.as_str())
            .field("ipfs_url", &self.ipfs_url.as_str())
            .field("chain_id", &self.chain_id)
            .field("private_key", &"<redacted>")
            .field("abi_path", &self.abi_path)
            .finish()
    }
}
