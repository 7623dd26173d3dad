//! HTTP application assembly.
//!
//! The application registers no routes yet: middleware is in place for the
//! job-queue endpoints that will be added on top of it, and any request is
//! answered with the framework's not-found response.

use axum::http::StatusCode;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::connector::RedisConnector;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the process-wide Redis connection.
    pub redis: RedisConnector,
}

impl AppState {
    /// Create new app state around the connector handle.
    pub fn new(redis: RedisConnector) -> Self {
        Self { redis }
    }
}

/// Create the HTTP application.
///
/// Cross-origin requests are accepted from any origin, and JSON request
/// bodies are deserialized by the `Json` extractor on whatever routes get
/// registered here later.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Default handler for unmatched paths.
async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
