//! Error types for the OpenRouter client.

use thiserror::Error;

/// Result type for OpenRouter client operations.
pub type Result<T> = std::result::Result<T, OpenRouterError>;

/// OpenRouter client errors.
///
/// None of these are retried by the client. Retry policy belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpenRouterError {
    /// No API key configured. Raised before any network activity.
    #[error("OpenRouter API key is not configured")]
    Unconfigured,

    /// Transport failure (DNS, connect, TLS, broken body stream)
    #[error("Network error: {0}")]
    Network(String),

    /// The request exceeded the configured timeout
    #[error("Request to OpenRouter timed out")]
    Timeout,

    /// Non-2xx response from the provider
    #[error("OpenRouter API error ({status}): {body}")]
    HttpStatus { status: u16, body: String },

    /// 2xx response without a usable first choice
    #[error("Invalid response from OpenRouter: {0}")]
    InvalidResponse(String),
}

impl OpenRouterError {
    /// Classify a reqwest transport error.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display_carries_status_and_body() {
        let err = OpenRouterError::HttpStatus {
            status: 429,
            body: "rate limited".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("429"));
        assert!(text.contains("rate limited"));
    }
}
