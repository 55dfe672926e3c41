//! # IPFS Content Store
//!
//! Client for the Kubo HTTP RPC API. Content is added with
//! `POST {api}/api/v0/add` as a multipart upload; Kubo wraps the bytes as a
//! UnixFS file, pins it, and answers with the root CID:
//!
//! ```json
//! {"Name":"file","Hash":"QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG","Size":"20"}
//! ```
//!
//! No request timeout is imposed here. Cancellation follows the caller: the
//! request is aborted when the `add` future is dropped.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use url::Url;

use freg_types::ContentId;

use crate::error::{StoreError, StoreResult};
use crate::traits::ContentStore;

const ADD_PATH: &str = "api/v0/add";

/// One line of the `/api/v0/add` response.
#[derive(Debug, Deserialize)]
struct AddResponse {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Hash")]
    hash: String,
}

/// Error body Kubo returns with non-2xx statuses.
#[derive(Debug, Deserialize)]
struct KuboError {
    #[serde(rename = "Message")]
    message: String,
}

/// Kubo RPC content store client.
#[derive(Debug, Clone)]
pub struct IpfsContentStore {
    client: reqwest::Client,
    api_url: String,
    add_url: String,
}

impl IpfsContentStore {
    /// Create a client for the Kubo RPC API at `api_url`
    /// (e.g. `http://127.0.0.1:5001`).
    pub fn new(api_url: &Url) -> StoreResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| StoreError::Unavailable {
                endpoint: api_url.to_string(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self::with_client(api_url, client))
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(api_url: &Url, client: reqwest::Client) -> Self {
        let base = api_url.as_str().trim_end_matches('/').to_string();
        let add_url = format!("{base}/{ADD_PATH}");
        Self {
            client,
            api_url: base,
            add_url,
        }
    }

    fn parse_add_body(&self, body: &str) -> StoreResult<ContentId> {
        // Kubo streams one JSON object per line; the last one names the root.
        let last = body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .last()
            .ok_or_else(|| StoreError::MalformedResponse {
                endpoint: self.add_url.clone(),
                reason: "empty response body".into(),
            })?;

        let parsed: AddResponse =
            serde_json::from_str(last).map_err(|e| StoreError::MalformedResponse {
                endpoint: self.add_url.clone(),
                reason: e.to_string(),
            })?;

        tracing::trace!(name = %parsed.name, hash = %parsed.hash, "kubo add response");
        ContentId::new(parsed.hash).map_err(|_| StoreError::EmptyContentId)
    }
}

#[async_trait]
impl ContentStore for IpfsContentStore {
    async fn add(&self, content: &[u8]) -> StoreResult<ContentId> {
        let form = Form::new().part("file", Part::bytes(content.to_vec()).file_name("file"));

        let resp = self
            .client
            .post(&self.add_url)
            .query(&[("pin", "true")])
            .multipart(form)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable {
                endpoint: self.api_url.clone(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| StoreError::MalformedResponse {
                endpoint: self.add_url.clone(),
                reason: format!("failed to read body: {e}"),
            })?;

        if !status.is_success() {
            let message = serde_json::from_str::<KuboError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            tracing::warn!(status = status.as_u16(), %message, "content store rejected add");
            return Err(StoreError::Rejected {
                endpoint: self.add_url.clone(),
                status: status.as_u16(),
                message,
            });
        }

        let cid = self.parse_add_body(&body)?;
        tracing::debug!(cid = %cid, bytes = content.len(), "added content to IPFS");
        Ok(cid)
    }

    fn endpoint(&self) -> &str {
        &self.api_url
    }
}
