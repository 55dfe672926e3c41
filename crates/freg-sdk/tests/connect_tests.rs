//! End-to-end tests of `Registry::connect` with wiremock servers standing in
//! for the IPFS node and the Ethereum JSON-RPC node.

use freg_sdk::{ErrorKind, Registry, RegistryConfig, RegistrySettings};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";
const CID: &str = "QmWATWQ7fVPP2EFGu71UkfnqhYXDYH566qy47CnJDgvs8u";
const TX_HASH: &str = "0x9fc76417374aa880d4449a1f7f31ec597f00b1f6f3dd2d66f4c9c6c445836d8b";

fn config(ipfs: &MockServer, rpc: &MockServer, abi_path: Option<&str>) -> RegistryConfig {
    RegistrySettings {
        contract_address: Some("0x5FbDB2315678afecb367f032d93F642f64180aa3".into()),
        eth_rpc_url: Some(rpc.uri()),
        ipfs_url: Some(ipfs.uri()),
        chain_id: Some(1338),
        private_key: Some(KEY.into()),
        abi_path: abi_path.map(str::to_string),
    }
    .validate()
    .expect("valid config")
}

fn rpc_result(result: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "jsonrpc": "2.0", "id": 1, "result": result }))
}

async fn mount_rpc(server: &MockServer, rpc_method: &str, result: serde_json::Value) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": rpc_method })))
        .respond_with(rpc_result(result))
        .mount(server)
        .await;
}

/// ABI encoding of a single `string` return value.
fn encoded_string_return(s: &str) -> String {
    let mut out = vec![0u8; 32];
    out[31] = 0x20;
    let mut len = [0u8; 32];
    len[24..].copy_from_slice(&(s.len() as u64).to_be_bytes());
    out.extend_from_slice(&len);
    let mut data = s.as_bytes().to_vec();
    data.resize(s.len().div_ceil(32) * 32, 0);
    out.extend_from_slice(&data);
    format!("0x{}", out.iter().map(|b| format!("{b:02x}")).collect::<String>())
}

#[tokio::test]
async fn upload_and_resolve_over_the_network() {
    let ipfs = MockServer::start().await;
    let rpc = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v0/add"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "Name": "file", "Hash": CID, "Size": "20" })),
        )
        .expect(1)
        .mount(&ipfs)
        .await;

    mount_rpc(&rpc, "eth_getTransactionCount", json!("0x0")).await;
    mount_rpc(&rpc, "eth_gasPrice", json!("0x3b9aca00")).await;
    mount_rpc(&rpc, "eth_estimateGas", json!("0x15f90")).await;
    mount_rpc(&rpc, "eth_sendRawTransaction", json!(TX_HASH)).await;
    mount_rpc(&rpc, "eth_call", json!(encoded_string_return(CID))).await;

    let registry = Registry::connect(&config(&ipfs, &rpc, None)).expect("connect");
    assert_eq!(registry.chain_id(), 1338);

    let receipt = registry
        .upload("/docs/readme.txt", b"Hello World!")
        .await
        .expect("upload");
    assert_eq!(receipt.cid.as_str(), CID);
    assert_eq!(receipt.tx.as_str(), TX_HASH);

    let resolved = registry.resolve("/docs/readme.txt").await.expect("resolve");
    assert_eq!(resolved.as_str(), CID);
}

#[tokio::test]
async fn store_failure_makes_no_rpc_call() {
    let ipfs = MockServer::start().await;
    let rpc = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&ipfs)
        .await;
    Mock::given(method("POST"))
        .respond_with(rpc_result(json!("0x0")))
        .expect(0)
        .mount(&rpc)
        .await;

    let registry = Registry::connect(&config(&ipfs, &rpc, None)).expect("connect");
    let err = registry.upload("/docs/readme.txt", b"x").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StoreError);
}

#[tokio::test]
async fn missing_abi_file_fails_connect() {
    let ipfs = MockServer::start().await;
    let rpc = MockServer::start().await;

    let err = Registry::connect(&config(&ipfs, &rpc, Some("/nonexistent/registry.abi.json")))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BindingError);
}

#[tokio::test]
async fn abi_without_registry_functions_fails_connect() {
    let ipfs = MockServer::start().await;
    let rpc = MockServer::start().await;

    let dir = tempfile::tempdir().expect("tempdir");
    let abi = dir.path().join("other.abi.json");
    std::fs::write(
        &abi,
        r#"[{"type":"function","name":"owner","inputs":[],"outputs":[{"name":"","type":"address"}],"stateMutability":"view"}]"#,
    )
    .expect("write abi");

    let err = Registry::connect(&config(&ipfs, &rpc, abi.to_str())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BindingError);
}
