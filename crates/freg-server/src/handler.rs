use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::Json;

use freg_protocol::{
    HealthResponse, InfoResponse, ResolveQuery, ResolveResponse, UploadRequest, UploadResponse,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> Json<InfoResponse> {
    Json(state.info().clone())
}

/// `POST /v1/files`: store the decoded file and record its CID under
/// `filePath`.
pub async fn upload_handler(
    State(state): State<AppState>,
    payload: Result<Json<UploadRequest>, JsonRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let Json(request) = payload?;
    if request.file_path.is_empty() {
        return Err(ApiError::missing_file_path());
    }
    let content = request.decode_file()?;

    let receipt = state.registry().upload(&request.file_path, &content).await?;
    Ok(Json(UploadResponse {
        cid: receipt.cid,
        tx_hash: receipt.tx,
    }))
}

/// `GET /v1/files?filePath=...`: return the CID recorded for the path.
pub async fn resolve_handler(
    State(state): State<AppState>,
    query: Result<Query<ResolveQuery>, QueryRejection>,
) -> Result<Json<ResolveResponse>, ApiError> {
    let Query(query) = query?;
    if query.file_path.is_empty() {
        return Err(ApiError::missing_file_path());
    }

    let cid = state.registry().resolve(&query.file_path).await?;
    Ok(Json(ResolveResponse { cid }))
}
