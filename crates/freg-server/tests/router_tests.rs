//! HTTP boundary tests: drive the router with `oneshot` over in-memory and
//! failing backends.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use freg_crypto::{SignerIdentity, SignerParams, TransactionSigner};
use freg_ledger::{InMemoryLedger, LedgerBinding, LedgerError, LedgerResult};
use freg_protocol::{InfoResponse, PROTOCOL_VERSION};
use freg_sdk::Registry;
use freg_server::{build_router, AppState, DEFAULT_MAX_BODY_BYTES};
use freg_store::{ContentStore, InMemoryContentStore, StoreError, StoreResult};
use freg_types::{ContentId, PathKey, TransactionRef};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

const KEY: &str = "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";

struct FailingStore;

#[async_trait]
impl ContentStore for FailingStore {
    async fn add(&self, _content: &[u8]) -> StoreResult<ContentId> {
        Err(StoreError::Unavailable {
            endpoint: "http://127.0.0.1:5001".into(),
            reason: "connection refused".into(),
        })
    }

    fn endpoint(&self) -> &str {
        "http://127.0.0.1:5001"
    }
}

struct StalledStore;

#[async_trait]
impl ContentStore for StalledStore {
    async fn add(&self, _content: &[u8]) -> StoreResult<ContentId> {
        std::future::pending().await
    }

    fn endpoint(&self) -> &str {
        "stalled"
    }
}

struct FailingLedger;

#[async_trait]
impl LedgerBinding for FailingLedger {
    async fn save(
        &self,
        _auth: &SignerParams,
        _path: &PathKey,
        _cid: &ContentId,
    ) -> LedgerResult<TransactionRef> {
        Err(LedgerError::Submission("nonce too low".into()))
    }

    async fn get(&self, _path: &PathKey) -> LedgerResult<ContentId> {
        Err(LedgerError::Query("connection refused".into()))
    }
}

fn info() -> InfoResponse {
    InfoResponse {
        name: "freg-server".into(),
        version: "test".into(),
        protocol_version: PROTOCOL_VERSION,
        contract_address: "0x5fbdb2315678afecb367f032d93f642f64180aa3".into(),
        chain_id: 1338,
        content_store: "memory".into(),
    }
}

fn app_with(
    store: Arc<dyn ContentStore>,
    ledger: Arc<dyn LedgerBinding>,
    deadline: Option<Duration>,
    max_body_bytes: usize,
) -> Router {
    let signer = TransactionSigner::new(SignerIdentity::from_hex(KEY, 1338).expect("key"));
    let registry = Registry::new(store, ledger, &signer)
        .expect("registry")
        .with_deadline(deadline);
    build_router(AppState::new(Arc::new(registry), info()), max_body_bytes)
}

fn app() -> Router {
    app_with(
        Arc::new(InMemoryContentStore::new()),
        Arc::new(InMemoryLedger::new()),
        None,
        DEFAULT_MAX_BODY_BYTES,
    )
}

fn post_json(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/files")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("request")
}

fn upload(path: &str, content: &[u8]) -> Request<Body> {
    post_json(json!({ "filePath": path, "file": STANDARD.encode(content) }).to_string())
}

fn resolve(query: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/v1/files{query}"))
        .body(Body::empty())
        .expect("request")
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn upload_then_resolve() {
    let app = app();

    let (status, body) = send(&app, upload("/docs/readme.txt", b"Hello World!")).await;
    assert_eq!(status, StatusCode::OK);
    let cid = body["cid"].as_str().expect("cid").to_string();
    assert!(!cid.is_empty());
    assert!(body["txHash"].as_str().expect("txHash").starts_with("0x"));

    let (status, body) = send(&app, resolve("?filePath=/docs/readme.txt")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "cid": cid }));
}

#[tokio::test]
async fn percent_encoded_path_is_decoded() {
    let app = app();
    let (_, uploaded) = send(&app, upload("/docs/my file.txt", b"spaces")).await;
    let (status, body) = send(&app, resolve("?filePath=%2Fdocs%2Fmy%20file.txt")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cid"], uploaded["cid"]);
}

#[tokio::test]
async fn unknown_path_resolves_to_empty_cid() {
    let (status, body) = send(&app(), resolve("?filePath=/unknown/path.txt")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "cid": "" }));
}

#[tokio::test]
async fn upload_without_path_is_rejected() {
    let (status, body) = send(&app(), upload("", b"data")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing filePath query parameter");
}

#[tokio::test]
async fn resolve_without_path_is_rejected() {
    for query in ["", "?filePath="] {
        let (status, body) = send(&app(), resolve(query)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing filePath query parameter");
    }
}

#[tokio::test]
async fn invalid_base64_is_rejected() {
    let request = post_json(r#"{"filePath":"/test/file.txt","file":"!!!notbase64!!!"}"#);
    let (status, body) = send(&app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().expect("error").starts_with("Invalid base64 data"));
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let (status, body) = send(&app(), post_json("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().expect("error").starts_with("Failed to parse JSON"));
}

#[tokio::test]
async fn store_failure_is_a_server_error() {
    let app = app_with(
        Arc::new(FailingStore),
        Arc::new(InMemoryLedger::new()),
        None,
        DEFAULT_MAX_BODY_BYTES,
    );
    let (status, body) = send(&app, upload("/docs/readme.txt", b"Hello World!")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().expect("error");
    assert!(message.starts_with("content store error"));
    assert!(message.contains("connection refused"));
}

#[tokio::test]
async fn ledger_failures_are_server_errors() {
    let app = app_with(
        Arc::new(InMemoryContentStore::new()),
        Arc::new(FailingLedger),
        None,
        DEFAULT_MAX_BODY_BYTES,
    );

    let (status, body) = send(&app, upload("/docs/readme.txt", b"Hello World!")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().expect("error").starts_with("contract save error"));

    let (status, body) = send(&app, resolve("?filePath=/docs/readme.txt")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().expect("error").starts_with("contract get error"));
}

#[tokio::test]
async fn stalled_request_times_out() {
    let app = app_with(
        Arc::new(StalledStore),
        Arc::new(InMemoryLedger::new()),
        Some(Duration::from_millis(50)),
        DEFAULT_MAX_BODY_BYTES,
    );
    let (status, body) = send(&app, upload("/slow", b"data")).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert!(body["error"].as_str().expect("error").contains("cancelled"));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let app = app_with(
        Arc::new(InMemoryContentStore::new()),
        Arc::new(InMemoryLedger::new()),
        None,
        1024,
    );
    let (status, _) = send(&app, upload("/big", &[7u8; 4096])).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn info_reports_contract() {
    let (status, body) = send(
        &app(),
        Request::builder()
            .uri("/v1/info")
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["chainId"], 1338);
    assert_eq!(body["contractAddress"], "0x5fbdb2315678afecb367f032d93f642f64180aa3");
}
