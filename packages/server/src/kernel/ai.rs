// AI implementation using OpenRouter
//
// This is the infrastructure implementation of BaseAI.
// Business logic (what to prompt for) lives in domain layers.

use async_trait::async_trait;
use openrouter_client::{ChatRequest, OpenRouterClient, OpenRouterError};

use super::{BaseAI, CompletionOptions};

/// OpenRouter implementation of AI capabilities
#[derive(Clone)]
pub struct OpenRouterAI {
    client: OpenRouterClient,
}

impl OpenRouterAI {
    pub fn new(client: OpenRouterClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BaseAI for OpenRouterAI {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, OpenRouterError> {
        let model_id = options.model.as_deref().unwrap_or(self.client.model());

        let mut request = ChatRequest::from_prompts(system_prompt, user_prompt)
            .temperature(options.temperature)
            .max_tokens(options.max_tokens);
        if let Some(model) = &options.model {
            request = request.model(model.clone());
        }

        tracing::info!(model = model_id, "Calling OpenRouter API");

        let response = self.client.chat_completion(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = model_id,
                prompt_preview = %preview(user_prompt, 200),
                "OpenRouter API call failed"
            );
            e
        })?;

        tracing::info!(
            response_length = response.content.len(),
            model = model_id,
            "OpenRouter API response received"
        );

        Ok(response.content)
    }

    fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    fn default_model(&self) -> &str {
        self.client.model()
    }
}

/// First `max_chars` characters of a prompt, for log lines.
fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
