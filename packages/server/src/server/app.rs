//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domains::assistant::{AssistantService, PromptRegistry};
use crate::kernel::BaseAI;
use crate::server::error::ApiError;
use crate::server::routes::{ai, health_handler};

/// Shared application state
///
/// Holds no per-request data; concurrent requests never observe each other.
#[derive(Clone)]
pub struct AxumAppState {
    pub assistant: Arc<AssistantService>,
}

/// Unmatched paths still get a JSON envelope.
async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Known paths hit with the wrong method.
async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Build the Axum application router around an AI provider.
pub fn build_app(ai: Arc<dyn BaseAI>) -> Router {
    let app_state = AxumAppState {
        assistant: Arc::new(AssistantService::new(PromptRegistry::standard(), ai)),
    };

    // CORS configuration - the dashboard may be served from any origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/api/ai/search-suggestions", post(ai::search_suggestions))
        .route("/api/ai/search-queries", post(ai::search_queries))
        .route("/api/ai/extract-entities", post(ai::extract_entities))
        .route("/api/ai/analyze-email", post(ai::analyze_email))
        .route("/api/ai/analyze-domain", post(ai::analyze_domain))
        .route("/api/ai/investigation-plan", post(ai::investigation_plan))
        .route("/api/ai/report", post(ai::report))
        .route("/api/ai/generate", post(ai::generate))
        .route("/health", get(health_handler))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
