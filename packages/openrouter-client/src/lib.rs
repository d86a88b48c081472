//! Pure OpenRouter REST API client
//!
//! A minimal client for OpenRouter's OpenAI-compatible chat completion API,
//! with no domain-specific logic. One call performs exactly one HTTP exchange;
//! nothing is retried.
//!
//! # Example
//!
//! ```rust,ignore
//! use openrouter_client::{ChatRequest, ClientConfig, OpenRouterClient};
//!
//! let client = OpenRouterClient::new(ClientConfig::with_api_key("sk-or-..."))?;
//!
//! let response = client
//!     .chat_completion(
//!         ChatRequest::from_prompts("You are terse.", "Hello!")
//!             .temperature(0.7)
//!             .max_tokens(1000),
//!     )
//!     .await?;
//! println!("{}", response.content);
//! ```

pub mod error;
pub mod types;

pub use error::{OpenRouterError, Result};
pub use types::*;

use std::time::Duration;

use reqwest::{header, Client};
use tracing::{debug, warn};

/// Default OpenRouter API base URL.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default free-tier model.
pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.1-8b-instruct:free";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration, fixed for the lifetime of the client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bearer token. `None` makes every call fail with `Unconfigured`.
    pub api_key: Option<String>,
    /// Model used when a request carries no override.
    pub model: String,
    /// API base URL (without the `/chat/completions` suffix)
    pub base_url: String,
    /// Upper bound for a whole request/response exchange
    pub timeout: Duration,
    /// Sent as `HTTP-Referer` for OpenRouter app attribution
    pub referer: Option<String>,
    /// Sent as `X-Title` for OpenRouter app attribution
    pub app_title: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            referer: None,
            app_title: None,
        }
    }
}

impl ClientConfig {
    /// Default configuration with the given API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }
}

/// Pure OpenRouter API client.
#[derive(Clone)]
pub struct OpenRouterClient {
    http_client: Client,
    config: ClientConfig,
}

impl OpenRouterClient {
    /// Create a new client. Fails only if the TLS backend cannot initialise.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| OpenRouterError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Whether an API key is present.
    pub fn is_configured(&self) -> bool {
        self.config
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// Default model.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Chat completion.
    ///
    /// Returns the content of the first choice.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let api_key = match self.config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Err(OpenRouterError::Unconfigured),
        };

        let model = request.model.as_deref().unwrap_or(&self.config.model);
        let body = ChatRequestBody {
            model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let start = std::time::Instant::now();

        let mut builder = self
            .http_client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header(header::AUTHORIZATION, format!("Bearer {}", api_key))
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(referer) = &self.config.referer {
            builder = builder.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.config.app_title {
            builder = builder.header("X-Title", title);
        }

        let response = builder.json(&body).send().await.map_err(|e| {
            warn!(error = %e, model, "OpenRouter request failed");
            OpenRouterError::from_transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, model, "OpenRouter API error");
            return Err(OpenRouterError::HttpStatus {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let chat_response: ChatResponseRaw = response.json().await.map_err(|e| {
            if e.is_timeout() {
                OpenRouterError::Timeout
            } else {
                OpenRouterError::InvalidResponse(e.to_string())
            }
        })?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.unwrap_or_default())
            .ok_or_else(|| OpenRouterError::InvalidResponse("no choices returned".into()))?;

        debug!(
            model,
            served_by = chat_response.model.as_deref().unwrap_or("unknown"),
            duration_ms = start.elapsed().as_millis(),
            "OpenRouter chat completion"
        );

        Ok(ChatResponse {
            content,
            model: chat_response.model,
            usage: chat_response.usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config() {
        let client = OpenRouterClient::new(ClientConfig {
            base_url: "https://custom.api.com".into(),
            ..ClientConfig::with_api_key("sk-or-test")
        })
        .unwrap();

        assert!(client.is_configured());
        assert_eq!(client.base_url(), "https://custom.api.com");
        assert_eq!(client.model(), DEFAULT_MODEL);
    }

    #[test]
    fn test_blank_key_is_unconfigured() {
        let client = OpenRouterClient::new(ClientConfig::with_api_key("   ")).unwrap();
        assert!(!client.is_configured());
    }

    #[tokio::test]
    async fn test_unconfigured_fails_without_network() {
        // Unroutable base URL: reaching the network would surface as Network/Timeout.
        let client = OpenRouterClient::new(ClientConfig {
            base_url: "http://192.0.2.1:9".into(),
            ..Default::default()
        })
        .unwrap();

        let err = client
            .chat_completion(ChatRequest::from_prompts("s", "u"))
            .await
            .unwrap_err();
        assert_eq!(err, OpenRouterError::Unconfigured);
    }
}
