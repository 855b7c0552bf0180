use super::state::AppState;
use crate::alexa::{RequestEnvelope, ResponseBuilder, ResponseEnvelope};
use crate::skill::messages;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::{error, info};

/// POST /alexa
/// Voice platform webhook
pub async fn alexa_webhook(State(state): State<AppState>, body: Bytes) -> Response {
    let envelope: RequestEnvelope = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            error!("Error processing request: malformed envelope: {}", e);
            return internal_error();
        }
    };

    info!("Request: {}", envelope.request.request_type());

    let reply = state.dispatcher.dispatch(envelope).await;
    (StatusCode::OK, Json(reply)).into_response()
}

/// Minimal valid envelope with the generic error speech, for unparseable bodies
fn internal_error() -> Response {
    let payload = ResponseBuilder::new()
        .speak(messages::ERROR)
        .with_should_end_session(false)
        .build();

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ResponseEnvelope::new(payload, None)),
    )
        .into_response()
}

/// GET /health
/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "status": "healthy", "service": state.service_name })),
    )
}

/// GET /
/// Service info
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "service": state.service_name,
            "status": "running",
            "endpoints": {
                "/alexa": "POST - Alexa skill endpoint",
                "/health": "GET - Health check"
            }
        })),
    )
}
