// TestDependencies - mock implementations for testing
//
// Provides a scripted BaseAI that can be injected into the assistant service.

use async_trait::async_trait;
use openrouter_client::OpenRouterError;
use std::sync::{Arc, Mutex};

use super::{BaseAI, CompletionOptions};

// =============================================================================
// Mock AI (Generic LLM capabilities)
// =============================================================================

/// Arguments captured from a completion call
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionCall {
    pub system_prompt: String,
    pub user_prompt: String,
    pub options: CompletionOptions,
}

#[derive(Clone)]
pub struct MockAI {
    responses: Arc<Mutex<Vec<Result<String, OpenRouterError>>>>,
    calls: Arc<Mutex<Vec<CompletionCall>>>,
    configured: bool,
}

impl Default for MockAI {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAI {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            configured: true,
        }
    }

    /// Add a text response to the queue
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push(Ok(response.into()));
        self
    }

    /// Add a JSON response to the queue (will be serialized)
    pub fn with_json_response<T: serde::Serialize>(self, data: &T) -> Self {
        let json = serde_json::to_string(data).expect("Failed to serialize mock response");
        self.responses.lock().unwrap().push(Ok(json));
        self
    }

    /// Add a provider failure to the queue
    pub fn with_error(self, error: OpenRouterError) -> Self {
        self.responses.lock().unwrap().push(Err(error));
        self
    }

    /// Behave like a provider without credentials: every call fails fast.
    pub fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    /// Get all calls that were sent to the AI
    pub fn calls(&self) -> Vec<CompletionCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the last call sent to the AI
    pub fn last_call(&self) -> Option<CompletionCall> {
        self.calls.lock().unwrap().last().cloned()
    }

    /// Check if a user prompt containing the given text was sent
    pub fn was_called_with(&self, text: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.user_prompt.contains(text))
    }

    /// Get the number of times the AI was called
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, OpenRouterError> {
        if !self.configured {
            return Err(OpenRouterError::Unconfigured);
        }

        // Record the call
        self.calls.lock().unwrap().push(CompletionCall {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            options: options.clone(),
        });

        let mut responses = self.responses.lock().unwrap();
        if !responses.is_empty() {
            responses.remove(0)
        } else {
            // Return default mock response
            Ok("Mock AI response".to_string())
        }
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn default_model(&self) -> &str {
        "mock/model"
    }
}
