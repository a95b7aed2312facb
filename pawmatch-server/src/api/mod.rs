//! REST API layer built on Axum.

/// API error types mapped to HTTP status codes.
pub mod errors;
/// HTTP request handlers and application state.
pub mod handlers;
/// Request and response data transfer objects.
pub mod models;

use axum::Router;
use axum::routing::{get, post};
use handlers::AppState;
use tower_http::trace::TraceLayer;

/// Build the router serving the match API.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/match/check", post(handlers::check_match))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
