// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// What to prompt for lives in domains/assistant.
//
// Naming convention: Base* for trait names (e.g., BaseAI)

use async_trait::async_trait;
use openrouter_client::OpenRouterError;

/// Default sampling temperature when a request does not supply one.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default completion token budget when a request does not supply one.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

// =============================================================================
// AI Trait (Infrastructure - Generic LLM capabilities)
// =============================================================================

/// Sampling parameters for a single completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    /// Per-request model override; `None` uses the configured model.
    pub model: Option<String>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            model: None,
        }
    }
}

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Run one system + user exchange and return the completion text.
    ///
    /// Exactly one provider call per invocation, never retried.
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, OpenRouterError>;

    /// Whether the provider has credentials.
    fn is_configured(&self) -> bool {
        true
    }

    /// Model used when no override is given.
    fn default_model(&self) -> &str;
}
