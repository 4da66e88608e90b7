//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    // Raise axum's 2 MiB extractor default to the configured upload bound
    let max_body = state.config.server.max_upload_bytes;
    Router::new()
        // Health and status endpoints
        .route("/", get(handlers::health::liveness))
        .route("/health", get(handlers::health::readiness))
        // Catalog endpoints
        .route("/languages", get(handlers::languages::list_languages))
        .route("/samples", get(handlers::samples::list_samples))
        // Synthesis endpoints
        .route("/synthesize", post(handlers::synthesize::synthesize))
        .route(
            "/synthesize-batch",
            post(handlers::synthesize::synthesize_batch),
        )
        .layer(DefaultBodyLimit::max(max_body))
        // Attach state
        .with_state(state)
}
