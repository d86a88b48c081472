//! AI assistant endpoints.
//!
//! Each handler validates its primary field, builds a completion request and
//! hands it to the assistant pipeline. Success is `{success: true, data}`,
//! including soft parse failures of object-shaped tasks.

use axum::{extract::Extension, Json};

use crate::domains::assistant::{
    CompletionRequest, Interpretation, PromptArgs, TaskId, SYSTEM_PROMPT_ARG,
};
use crate::server::app::AxumAppState;
use crate::server::error::{ApiError, Envelope};
use crate::server::request::{JsonBody, RequestBody};

type ApiResult = Result<Json<Envelope<Interpretation>>, ApiError>;

async fn dispatch(state: &AxumAppState, request: CompletionRequest) -> ApiResult {
    let result = state.assistant.run(request).await?;
    Ok(Json(Envelope::ok(result.parsed)))
}

/// POST /api/ai/search-suggestions - search engine dorks for a free-text query
pub async fn search_suggestions(
    Extension(state): Extension<AxumAppState>,
    body: JsonBody,
) -> ApiResult {
    let body = RequestBody::from_extractor(body)?;
    let query = body.required_str("query", "Query")?;

    let request = body.completion_request(
        TaskId::SearchSuggestions,
        PromptArgs::new().with("query", query),
    )?;
    dispatch(&state, request).await
}

/// POST /api/ai/search-queries - search queries for a typed target
pub async fn search_queries(
    Extension(state): Extension<AxumAppState>,
    body: JsonBody,
) -> ApiResult {
    let body = RequestBody::from_extractor(body)?;
    let target = body.required_str("target", "Target")?;
    let target_type = body.optional_str("type")?;

    let request = body.completion_request(
        TaskId::SearchQueries,
        PromptArgs::new()
            .with("target", target)
            .with_opt("type", target_type),
    )?;
    dispatch(&state, request).await
}

/// POST /api/ai/extract-entities - pull emails, domains, IPs, handles out of text
pub async fn extract_entities(
    Extension(state): Extension<AxumAppState>,
    body: JsonBody,
) -> ApiResult {
    let body = RequestBody::from_extractor(body)?;
    let text = body.required_str("text", "Text")?;

    let request = body.completion_request(
        TaskId::EntityExtraction,
        PromptArgs::new().with("text", text),
    )?;
    dispatch(&state, request).await
}

/// POST /api/ai/analyze-email
pub async fn analyze_email(
    Extension(state): Extension<AxumAppState>,
    body: JsonBody,
) -> ApiResult {
    let body = RequestBody::from_extractor(body)?;
    let email = body.required_str("email", "Email")?;

    let request = body.completion_request(
        TaskId::EmailAnalysis,
        PromptArgs::new().with("email", email),
    )?;
    dispatch(&state, request).await
}

/// POST /api/ai/analyze-domain
pub async fn analyze_domain(
    Extension(state): Extension<AxumAppState>,
    body: JsonBody,
) -> ApiResult {
    let body = RequestBody::from_extractor(body)?;
    let domain = body.required_str("domain", "Domain")?;

    let request = body.completion_request(
        TaskId::DomainAnalysis,
        PromptArgs::new().with("domain", domain),
    )?;
    dispatch(&state, request).await
}

/// POST /api/ai/investigation-plan
pub async fn investigation_plan(
    Extension(state): Extension<AxumAppState>,
    body: JsonBody,
) -> ApiResult {
    let body = RequestBody::from_extractor(body)?;
    let target = body.required_str("target", "Target")?;
    let context = body.optional_str("context")?;

    let request = body.completion_request(
        TaskId::InvestigationPlan,
        PromptArgs::new()
            .with("target", target)
            .with_opt("context", context),
    )?;
    dispatch(&state, request).await
}

/// POST /api/ai/report - narrative report from collected findings
pub async fn report(
    Extension(state): Extension<AxumAppState>,
    body: JsonBody,
) -> ApiResult {
    let body = RequestBody::from_extractor(body)?;
    let findings = body.required_str("findings", "Findings")?;
    let target = body.optional_str("target")?;

    let request = body.completion_request(
        TaskId::Report,
        PromptArgs::new()
            .with("findings", findings)
            .with_opt("target", target),
    )?;
    dispatch(&state, request).await
}

/// POST /api/ai/generate - free-form prompt with optional system prompt
pub async fn generate(
    Extension(state): Extension<AxumAppState>,
    body: JsonBody,
) -> ApiResult {
    let body = RequestBody::from_extractor(body)?;
    let prompt = body.required_str("prompt", "Prompt")?;
    let system_prompt = body.optional_str("systemPrompt")?;

    let request = body.completion_request(
        TaskId::Generate,
        PromptArgs::new()
            .with("prompt", prompt)
            .with_opt(SYSTEM_PROMPT_ARG, system_prompt),
    )?;
    dispatch(&state, request).await
}
