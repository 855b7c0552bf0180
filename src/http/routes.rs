use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Service info
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        // Voice platform webhook
        .route("/alexa", post(handlers::alexa_webhook))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
