use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AxumAppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    ai: AiHealth,
}

#[derive(Serialize)]
pub struct AiHealth {
    configured: bool,
    model: String,
}

/// Health check endpoint
///
/// Liveness only: no provider call is made. A missing API key is reported
/// but does not make the service unhealthy.
pub async fn health_handler(
    Extension(state): Extension<AxumAppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let ai = state.assistant.ai();

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            ai: AiHealth {
                configured: ai.is_configured(),
                model: ai.default_model().to_string(),
            },
        }),
    )
}
