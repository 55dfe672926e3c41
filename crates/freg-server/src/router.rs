use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use freg_protocol::endpoints;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all registry endpoints.
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route(endpoints::HEALTH, get(handler::health_handler))
        .route(endpoints::INFO, get(handler::info_handler))
        .route(
            endpoints::FILES,
            post(handler::upload_handler).get(handler::resolve_handler),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
