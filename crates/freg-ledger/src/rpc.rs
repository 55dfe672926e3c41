//! Minimal Ethereum JSON-RPC 2.0 client.
//!
//! One long-lived `reqwest::Client` per process. No request timeout is set;
//! dropping a pending call aborts the HTTP request.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

/// Errors from a single JSON-RPC exchange.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RpcError {
    /// The node could not be reached.
    #[error("RPC endpoint {endpoint} unreachable: {reason}")]
    Transport { endpoint: String, reason: String },

    /// The node answered with a non-2xx HTTP status.
    #[error("RPC endpoint returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The node answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The response could not be decoded into the expected shape.
    #[error("invalid RPC response for {method}: {reason}")]
    Decode { method: String, reason: String },
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Ethereum JSON-RPC client over HTTP.
#[derive(Debug)]
pub struct JsonRpcClient {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(url: &Url) -> Result<Self, RpcError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| RpcError::Transport {
                endpoint: url.to_string(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self::with_client(url, client))
    }

    pub fn with_client(url: &Url, client: reqwest::Client) -> Self {
        Self {
            client,
            url: url.to_string(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send `method` with `params` and decode the `result` field as `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id,
        });

        tracing::trace!(method, id, "sending JSON-RPC request");

        let resp = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| RpcError::Transport {
                endpoint: self.url.clone(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RpcError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let decoded: RpcResponse = resp.json().await.map_err(|e| RpcError::Decode {
            method: method.to_string(),
            reason: e.to_string(),
        })?;

        if let Some(error) = decoded.error {
            return Err(RpcError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        let result = decoded.result.ok_or_else(|| RpcError::Decode {
            method: method.to_string(),
            reason: "response has neither result nor error".into(),
        })?;

        serde_json::from_value(result).map_err(|e| RpcError::Decode {
            method: method.to_string(),
            reason: e.to_string(),
        })
    }

    /// Call a method whose result is a hex quantity (`"0x1a"`).
    pub async fn request_quantity(&self, method: &str, params: Value) -> Result<u128, RpcError> {
        let raw: String = self.request(method, params).await?;
        parse_quantity(&raw).map_err(|reason| RpcError::Decode {
            method: method.to_string(),
            reason,
        })
    }
}

/// Parse a JSON-RPC hex quantity.
pub fn parse_quantity(value: &str) -> Result<u128, String> {
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| format!("quantity {value:?} lacks 0x prefix"))?;
    if digits.is_empty() {
        return Err("empty quantity".into());
    }
    u128::from_str_radix(digits, 16).map_err(|e| format!("bad quantity {value:?}: {e}"))
}
