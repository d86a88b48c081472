//! Gateway errors and the uniform response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use openrouter_client::OpenRouterError;
use serde::Serialize;
use thiserror::Error;

use crate::domains::assistant::AssistantError;

/// `{success, data?, error?, message?}` shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }
}

impl Envelope<()> {
    pub fn failure(error: impl Into<String>, message: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request field
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Assistant(#[from] AssistantError),

    #[error("Request body is too large")]
    PayloadTooLarge,

    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Assistant(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable, user-safe category. Clients may branch on this string.
    pub fn category(&self) -> String {
        match self {
            ApiError::Validation(reason) => reason.clone(),
            ApiError::PayloadTooLarge | ApiError::NotFound | ApiError::MethodNotAllowed => {
                self.to_string()
            }
            ApiError::Assistant(AssistantError::UnknownTask(_)) => {
                "AI task is not available".to_string()
            }
            ApiError::Assistant(AssistantError::Provider(err)) => {
                let category = match err {
                    OpenRouterError::Unconfigured => "AI service is not configured",
                    OpenRouterError::Network(_) => "AI service is unreachable",
                    OpenRouterError::Timeout => "AI service timed out",
                    OpenRouterError::HttpStatus { .. } => "AI service returned an error",
                    OpenRouterError::InvalidResponse(_) => {
                        "AI service returned an invalid response"
                    }
                };
                category.to_string()
            }
        }
    }

    /// Diagnostic text for 5xx responses. Not meant for pattern matching.
    pub fn message(&self) -> Option<String> {
        match self {
            ApiError::Assistant(err) => Some(err.to_string()),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, status = %status, "AI request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
        }

        (
            status,
            Json(Envelope::failure(self.category(), self.message())),
        )
            .into_response()
    }
}
