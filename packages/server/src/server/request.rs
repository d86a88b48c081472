//! Inbound body validation for the AI endpoints.
//!
//! Bodies are taken as loose JSON so that a missing or mistyped field turns
//! into our own 400 envelope instead of an extractor rejection.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use super::error::ApiError;
use crate::domains::assistant::{CompletionRequest, PromptArgs, TaskId};

pub type JsonBody = Result<Json<Value>, JsonRejection>;

#[derive(Debug, Clone)]
pub struct RequestBody(Value);

impl RequestBody {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Unwrap the extractor result. Oversized bodies keep their 413; any other
    /// rejection is a validation error.
    pub fn from_extractor(body: JsonBody) -> Result<Self, ApiError> {
        match body {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Err(ApiError::PayloadTooLarge)
            }
            Err(rejection) => Err(ApiError::Validation(format!(
                "Request body must be valid JSON: {}",
                rejection.body_text()
            ))),
        }
    }

    fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    /// Required string field. `label` names it in the error message.
    pub fn required_str(&self, name: &str, label: &str) -> Result<&str, ApiError> {
        match self.field(name) {
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.as_str()),
            _ => Err(ApiError::Validation(format!(
                "{label} is required and must be a string"
            ))),
        }
    }

    /// Optional string field; present but not a string is an error.
    pub fn optional_str(&self, name: &str) -> Result<Option<&str>, ApiError> {
        match self.field(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(ApiError::Validation(format!("{name} must be a string"))),
        }
    }

    pub fn temperature(&self) -> Result<Option<f32>, ApiError> {
        match self.field("temperature") {
            None => Ok(None),
            Some(value) => value
                .as_f64()
                .filter(|t| (0.0..=2.0).contains(t))
                .map(|t| Some(t as f32))
                .ok_or_else(|| {
                    ApiError::Validation("temperature must be a number between 0 and 2".into())
                }),
        }
    }

    pub fn max_tokens(&self) -> Result<Option<u32>, ApiError> {
        match self.field("max_tokens") {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .filter(|n| *n > 0)
                .and_then(|n| u32::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| {
                    ApiError::Validation("max_tokens must be a positive integer".into())
                }),
        }
    }

    /// Build a completion request, applying sampling overrides from the body.
    pub fn completion_request(
        &self,
        task: TaskId,
        args: PromptArgs,
    ) -> Result<CompletionRequest, ApiError> {
        let mut request = CompletionRequest::new(task, args);
        if let Some(temperature) = self.temperature()? {
            request.temperature = temperature;
        }
        if let Some(max_tokens) = self.max_tokens()? {
            request.max_tokens = max_tokens;
        }
        request.model = self
            .optional_str("model")?
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string);
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
    use serde_json::json;

    fn validation_message(err: ApiError) -> String {
        match err {
            ApiError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_required_str_rejects_missing_wrong_type_and_blank() {
        for body in [
            json!({}),
            json!({"email": 42}),
            json!({"email": null}),
            json!({"email": "  "}),
            json!([1]),
        ] {
            let err = RequestBody::new(body)
                .required_str("email", "Email")
                .unwrap_err();
            assert_eq!(
                validation_message(err),
                "Email is required and must be a string"
            );
        }
    }

    #[test]
    fn test_required_str_accepts_string() {
        let body = RequestBody::new(json!({"email": "jane@example.com"}));
        assert_eq!(body.required_str("email", "Email").unwrap(), "jane@example.com");
    }

    #[test]
    fn test_optional_str() {
        let body = RequestBody::new(json!({"context": "phishing", "bad": 3}));
        assert_eq!(body.optional_str("context").unwrap(), Some("phishing"));
        assert_eq!(body.optional_str("absent").unwrap(), None);
        assert_eq!(
            validation_message(body.optional_str("bad").unwrap_err()),
            "bad must be a string"
        );
    }

    #[test]
    fn test_sampling_defaults_and_overrides() {
        let defaults = RequestBody::new(json!({}))
            .completion_request(TaskId::Generate, PromptArgs::new())
            .unwrap();
        assert_eq!(defaults.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(defaults.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(defaults.model, None);

        let custom = RequestBody::new(json!({
            "temperature": 1.5,
            "max_tokens": 50,
            "model": "x/y"
        }))
        .completion_request(TaskId::Generate, PromptArgs::new())
        .unwrap();
        assert_eq!(custom.temperature, 1.5);
        assert_eq!(custom.max_tokens, 50);
        assert_eq!(custom.model.as_deref(), Some("x/y"));
    }

    #[test]
    fn test_sampling_out_of_range_is_rejected() {
        for body in [
            json!({"temperature": 2.5}),
            json!({"temperature": -0.1}),
            json!({"temperature": "hot"}),
            json!({"max_tokens": 0}),
            json!({"max_tokens": -5}),
            json!({"max_tokens": 10.5}),
        ] {
            assert!(RequestBody::new(body)
                .completion_request(TaskId::Generate, PromptArgs::new())
                .is_err());
        }
    }
}
