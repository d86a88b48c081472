//! Response interpreter: raw completion text -> the shape a task promised.
//!
//! List and text shapes cannot fail. Object shapes fail softly: a completion
//! that is not a JSON object carrying every documented key comes back as
//! `JsonOutcome::Unparsed`, which serializes to
//! `{"error": "could not parse response", "rawResponse": <original text>}`
//! and is still delivered with HTTP 200.

use serde::Serialize;
use serde_json::Value;

use super::prompts::{ExpectedShape, ObjectSchema};

/// Error string carried by the soft-failure envelope.
pub const UNPARSED_ERROR: &str = "could not parse response";

/// Soft-failure envelope for object-shaped tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnparsedResponse {
    pub error: &'static str,
    #[serde(rename = "rawResponse")]
    pub raw_response: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JsonOutcome {
    Parsed(Value),
    Unparsed(UnparsedResponse),
}

/// Interpreted completion, serialized as the `data` of a response envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Interpretation {
    Text(String),
    Lines(Vec<String>),
    Object(JsonOutcome),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResult {
    pub raw_text: String,
    pub parsed: Interpretation,
    pub parse_succeeded: bool,
    /// Only ever true for object shapes that did not parse.
    pub fallback_used: bool,
}

/// Interpret `raw` according to `shape`.
pub fn interpret(raw: &str, shape: &ExpectedShape) -> CompletionResult {
    let (parsed, parse_succeeded) = match shape {
        ExpectedShape::FreeText => (Interpretation::Text(raw.trim().to_string()), true),
        ExpectedShape::LineList => (Interpretation::Lines(parse_lines(raw)), true),
        ExpectedShape::JsonObject(schema) => match parse_object(raw, schema) {
            Some(value) => (Interpretation::Object(JsonOutcome::Parsed(value)), true),
            None => (
                Interpretation::Object(JsonOutcome::Unparsed(UnparsedResponse {
                    error: UNPARSED_ERROR,
                    raw_response: raw.to_string(),
                })),
                false,
            ),
        },
    };

    CompletionResult {
        raw_text: raw.to_string(),
        fallback_used: !parse_succeeded && !matches!(shape, ExpectedShape::FreeText),
        parsed,
        parse_succeeded,
    }
}

/// Line-list rule shared by every list task.
///
/// Trim each line, drop blanks and `-` bullet lines, and strip one pair of
/// double quotes when they wrap the whole line. Quotes inside a line are kept,
/// so `"acme corp" site:linkedin.com` survives as written.
pub fn parse_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('-'))
        .map(strip_wrapping_quotes)
        .map(str::to_string)
        .collect()
}

fn strip_wrapping_quotes(line: &str) -> &str {
    if line.len() >= 2 && line.starts_with('"') && line.ends_with('"') {
        &line[1..line.len() - 1]
    } else {
        line
    }
}

/// Strict parse, then the body of a markdown code fence if the completion
/// is exactly one fenced block. Prose around the JSON is not tolerated.
fn parse_object(raw: &str, schema: &ObjectSchema) -> Option<Value> {
    let value = serde_json::from_str::<Value>(raw)
        .ok()
        .or_else(|| fenced_body(raw).and_then(|body| serde_json::from_str(body).ok()))?;

    let object = value.as_object()?;
    if schema.required.iter().all(|key| object.contains_key(key)) {
        Some(value)
    } else {
        tracing::debug!(
            schema = %schema.name,
            missing = ?schema
                .required
                .iter()
                .filter(|key| !object.contains_key(key.as_str()))
                .collect::<Vec<_>>(),
            "Completion JSON is missing documented keys"
        );
        None
    }
}

fn fenced_body(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let inner = trimmed.strip_prefix("```")?.strip_suffix("```")?;
    // Drop the info string (```json) on the opening line. A fence on a single
    // line has no info string.
    let body = match inner.split_once('\n') {
        Some((_, body)) => body,
        None => inner,
    };
    Some(body.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(keys: &[&str]) -> ExpectedShape {
        ExpectedShape::JsonObject(ObjectSchema {
            name: "Test".to_string(),
            required: keys.iter().map(|k| k.to_string()).collect(),
        })
    }

    #[test]
    fn test_line_list_drops_blanks_bullets_and_wrapping_quotes() {
        let result = interpret("a\n\n- b\n\"c\"\n", &ExpectedShape::LineList);
        assert_eq!(
            result.parsed,
            Interpretation::Lines(vec!["a".to_string(), "c".to_string()])
        );
        assert!(result.parse_succeeded);
        assert!(!result.fallback_used);
    }

    #[test]
    fn test_line_list_keeps_inner_quotes() {
        let raw = "\"acme corp\" site:linkedin.com\nacme corp filetype:pdf\n";
        assert_eq!(
            parse_lines(raw),
            vec![
                "\"acme corp\" site:linkedin.com".to_string(),
                "acme corp filetype:pdf".to_string(),
            ]
        );
    }

    #[test]
    fn test_line_list_of_blank_lines_is_empty() {
        let result = interpret("\n   \n\t\n", &ExpectedShape::LineList);
        assert_eq!(result.parsed, Interpretation::Lines(Vec::new()));
        assert!(result.parse_succeeded);
    }

    #[test]
    fn test_line_list_handles_crlf_and_lone_quote() {
        assert_eq!(
            parse_lines("one\r\n\"\r\n  two  \r\n"),
            vec!["one".to_string(), "\"".to_string(), "two".to_string()]
        );
    }

    #[test]
    fn test_free_text_is_trimmed() {
        let result = interpret("  hello world \n", &ExpectedShape::FreeText);
        assert_eq!(result.parsed, Interpretation::Text("hello world".to_string()));
        assert_eq!(result.raw_text, "  hello world \n");
    }

    #[test]
    fn test_empty_free_text_round_trips() {
        let result = interpret("", &ExpectedShape::FreeText);
        assert_eq!(result.parsed, Interpretation::Text(String::new()));
        assert!(result.parse_succeeded);
        assert!(!result.fallback_used);
    }

    #[test]
    fn test_valid_json_object_is_returned_as_is() {
        let raw = r#"{"riskLevel":"low","extra":[1,2,3]}"#;
        let result = interpret(raw, &schema(&["riskLevel"]));
        assert_eq!(
            result.parsed,
            Interpretation::Object(JsonOutcome::Parsed(
                json!({"riskLevel": "low", "extra": [1, 2, 3]})
            ))
        );
        assert!(result.parse_succeeded);
        assert!(!result.fallback_used);
    }

    #[test]
    fn test_invalid_json_becomes_soft_failure_with_exact_raw() {
        let raw = "Here is the JSON: {\"riskLevel\": \"low\"}";
        let result = interpret(raw, &schema(&["riskLevel"]));

        assert!(!result.parse_succeeded);
        assert!(result.fallback_used);
        assert_eq!(
            serde_json::to_value(&result.parsed).unwrap(),
            json!({"error": "could not parse response", "rawResponse": raw})
        );
    }

    #[test]
    fn test_missing_key_is_treated_as_parse_failure() {
        let raw = r#"{"summary":"ok"}"#;
        let result = interpret(raw, &schema(&["summary", "riskLevel"]));
        assert!(result.fallback_used);
        assert!(matches!(
            result.parsed,
            Interpretation::Object(JsonOutcome::Unparsed(_))
        ));
    }

    #[test]
    fn test_non_object_json_is_treated_as_parse_failure() {
        let result = interpret("[1, 2]", &schema(&[]));
        assert!(result.fallback_used);
    }

    #[test]
    fn test_fenced_json_is_accepted() {
        let raw = "```json\n{\"riskLevel\": \"high\"}\n```";
        let result = interpret(raw, &schema(&["riskLevel"]));
        assert_eq!(
            result.parsed,
            Interpretation::Object(JsonOutcome::Parsed(json!({"riskLevel": "high"})))
        );
    }

    #[test]
    fn test_single_line_fence_is_accepted() {
        let result = interpret("```{\"riskLevel\": \"low\"}```", &schema(&["riskLevel"]));
        assert_eq!(
            result.parsed,
            Interpretation::Object(JsonOutcome::Parsed(json!({"riskLevel": "low"})))
        );
        assert!(result.parse_succeeded);
    }

    #[test]
    fn test_interpretations_serialize_untagged() {
        assert_eq!(
            serde_json::to_value(Interpretation::Text("x".into())).unwrap(),
            json!("x")
        );
        assert_eq!(
            serde_json::to_value(Interpretation::Lines(vec!["a".into()])).unwrap(),
            json!(["a"])
        );
    }
}
