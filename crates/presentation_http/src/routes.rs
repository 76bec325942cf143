//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::{
    error::json_payload_too_large, handlers, middleware::RequestIdLayer, state::AppState,
};

/// Create the main router with all routes
///
/// The coaching endpoint gets a body ceiling derived from the configured
/// upload limits instead of axum's 2 MiB default. Requests over the ceiling
/// get the same JSON error body as every other failure.
pub fn create_router(state: AppState) -> Router {
    let max_body_bytes = state.config.limits.max_body_bytes();

    let assistant = Router::new()
        .route(
            "/coach",
            post(handlers::coach::coach)
                .layer::<_, std::convert::Infallible>(DefaultBodyLimit::disable())
                .layer::<_, std::convert::Infallible>(RequestBodyLimitLayer::new(max_body_bytes))
                .layer::<_, std::convert::Infallible>(axum::middleware::map_response(json_payload_too_large)),
        )
        .route("/languages", get(handlers::languages::list_languages))
        .route("/suggestions", get(handlers::languages::list_suggestions));

    Router::new()
        // Health and status endpoints
        .route("/api/v1/health", get(handlers::health::health_check))
        .route("/api/v1/ready", get(handlers::health::readiness_check))
        // Coaching API (v1)
        .nest("/api/v1/assistant", assistant)
        .layer(RequestIdLayer::new())
        // Attach state
        .with_state(state)
}
