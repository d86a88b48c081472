//! Assistant pipeline: registry -> provider -> interpreter.

use std::sync::Arc;
use std::time::Instant;

use openrouter_client::OpenRouterError;
use thiserror::Error;

use super::interpreter::{interpret, CompletionResult};
use super::prompts::{PromptArgs, PromptRegistry, TaskId, UnknownTask};
use crate::kernel::{BaseAI, CompletionOptions, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

/// One AI task invocation. Lives for a single gateway call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub task: TaskId,
    pub args: PromptArgs,
    pub temperature: f32,
    pub max_tokens: u32,
    pub model: Option<String>,
}

impl CompletionRequest {
    pub fn new(task: TaskId, args: PromptArgs) -> Self {
        Self {
            task,
            args,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            model: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssistantError {
    #[error(transparent)]
    UnknownTask(#[from] UnknownTask),

    #[error(transparent)]
    Provider(#[from] OpenRouterError),
}

/// Stateless; safe to share across concurrent requests.
#[derive(Clone)]
pub struct AssistantService {
    registry: Arc<PromptRegistry>,
    ai: Arc<dyn BaseAI>,
}

impl AssistantService {
    pub fn new(registry: PromptRegistry, ai: Arc<dyn BaseAI>) -> Self {
        Self {
            registry: Arc::new(registry),
            ai,
        }
    }

    pub fn ai(&self) -> &dyn BaseAI {
        self.ai.as_ref()
    }

    /// Run a task end to end. Provider failures are returned, never retried.
    pub async fn run(&self, request: CompletionRequest) -> Result<CompletionResult, AssistantError> {
        let prompt = self.registry.build(request.task, &request.args)?;

        let options = CompletionOptions {
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            model: request.model,
        };

        let start = Instant::now();
        let raw = self
            .ai
            .complete(&prompt.system_prompt, &prompt.user_prompt, &options)
            .await?;

        let result = interpret(&raw, &prompt.shape);

        if result.fallback_used {
            tracing::warn!(
                task = %request.task,
                raw_length = raw.len(),
                "AI response did not match the expected shape, returning raw text"
            );
        }
        tracing::debug!(
            task = %request.task,
            parse_succeeded = result.parse_succeeded,
            duration_ms = start.elapsed().as_millis(),
            "AI task completed"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::assistant::interpreter::Interpretation;
    use crate::kernel::MockAI;

    fn service(ai: MockAI) -> AssistantService {
        AssistantService::new(PromptRegistry::standard(), Arc::new(ai))
    }

    #[tokio::test]
    async fn test_run_passes_prompts_and_options_to_provider() {
        let ai = MockAI::new().with_response("dork one\ndork two");
        let svc = service(ai.clone());

        let mut request = CompletionRequest::new(
            TaskId::SearchSuggestions,
            PromptArgs::new().with("query", "acme corp"),
        );
        request.temperature = 0.2;
        request.max_tokens = 256;
        request.model = Some("other/model".to_string());

        let result = svc.run(request).await.unwrap();
        assert_eq!(
            result.parsed,
            Interpretation::Lines(vec!["dork one".into(), "dork two".into()])
        );

        let call = ai.last_call().unwrap();
        assert!(call.user_prompt.contains("acme corp"));
        assert!(call.system_prompt.contains("one query per line"));
        assert_eq!(call.options.temperature, 0.2);
        assert_eq!(call.options.max_tokens, 256);
        assert_eq!(call.options.model.as_deref(), Some("other/model"));
    }

    #[tokio::test]
    async fn test_defaults_apply_when_not_overridden() {
        let ai = MockAI::new();
        let svc = service(ai.clone());

        svc.run(CompletionRequest::new(
            TaskId::Generate,
            PromptArgs::new().with("prompt", "hi"),
        ))
        .await
        .unwrap();

        let call = ai.last_call().unwrap();
        assert_eq!(call.options.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(call.options.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(call.options.model, None);
    }

    #[tokio::test]
    async fn test_provider_error_is_not_retried() {
        let ai = MockAI::new()
            .with_error(OpenRouterError::HttpStatus {
                status: 429,
                body: "slow down".into(),
            })
            .with_response("would succeed on retry");
        let svc = service(ai.clone());

        let err = svc
            .run(CompletionRequest::new(
                TaskId::Report,
                PromptArgs::new().with("findings", "none"),
            ))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AssistantError::Provider(OpenRouterError::HttpStatus { status: 429, .. })
        ));
        assert_eq!(ai.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_task_never_reaches_provider() {
        let ai = MockAI::new();
        let svc = AssistantService::new(
            PromptRegistry::with_specs(Vec::new()),
            Arc::new(ai.clone()),
        );

        let err = svc
            .run(CompletionRequest::new(TaskId::Generate, PromptArgs::new()))
            .await
            .unwrap_err();

        assert!(matches!(err, AssistantError::UnknownTask(_)));
        assert_eq!(ai.call_count(), 0);
    }
}
