use serde::{Deserialize, Serialize};

pub const PROTOCOL_VERSION: u32 = 1;

/// HTTP endpoint paths for the registry API.
pub mod endpoints {
    /// `POST` uploads a file, `GET ?filePath=` resolves one.
    pub const FILES: &str = "/v1/files";
    pub const HEALTH: &str = "/v1/health";
    pub const INFO: &str = "/v1/info";
}

/// Health check response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub protocol_version: u32,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            protocol_version: PROTOCOL_VERSION,
        }
    }
}

/// Service description returned by the info endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub name: String,
    pub version: String,
    pub protocol_version: u32,
    pub contract_address: String,
    pub chain_id: u64,
    pub content_store: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_defaults() {
        let h = HealthResponse::default();
        assert_eq!(h.status, "ok");
        assert_eq!(h.protocol_version, 1);
    }

    #[test]
    fn endpoint_paths() {
        assert_eq!(endpoints::FILES, "/v1/files");
        assert_eq!(endpoints::HEALTH, "/v1/health");
        assert_eq!(endpoints::INFO, "/v1/info");
    }

    #[test]
    fn info_is_camel_case() {
        let info = InfoResponse {
            name: "freg-server".into(),
            version: "0.1.0".into(),
            protocol_version: PROTOCOL_VERSION,
            contract_address: "0x0000000000000000000000000000000000000002".into(),
            chain_id: 1338,
            content_store: "http://localhost:5001".into(),
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["contractAddress"], "0x0000000000000000000000000000000000000002");
        assert_eq!(json["chainId"], 1338);
    }
}
