//! Prompt template registry.
//!
//! One entry per AI task: the fixed system prompt, a user prompt template,
//! and the output shape the interpreter enforces for that task. Adding a
//! capability means adding a `TaskId` variant and one entry in
//! `PromptRegistry::standard`.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use schemars::{schema_for, JsonSchema};
use thiserror::Error;

use super::models::{DomainAnalysis, EmailAnalysis, ExtractedEntities, InvestigationPlan};

// =============================================================================
// Task identifiers
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskId {
    SearchSuggestions,
    SearchQueries,
    EntityExtraction,
    EmailAnalysis,
    DomainAnalysis,
    InvestigationPlan,
    Report,
    Generate,
}

impl TaskId {
    pub const ALL: [TaskId; 8] = [
        TaskId::SearchSuggestions,
        TaskId::SearchQueries,
        TaskId::EntityExtraction,
        TaskId::EmailAnalysis,
        TaskId::DomainAnalysis,
        TaskId::InvestigationPlan,
        TaskId::Report,
        TaskId::Generate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskId::SearchSuggestions => "search-suggestions",
            TaskId::SearchQueries => "search-queries",
            TaskId::EntityExtraction => "entity-extraction",
            TaskId::EmailAnalysis => "email-analysis",
            TaskId::DomainAnalysis => "domain-analysis",
            TaskId::InvestigationPlan => "investigation-plan",
            TaskId::Report => "report",
            TaskId::Generate => "generate",
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskId {
    type Err = UnknownTask;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskId::ALL
            .into_iter()
            .find(|task| task.as_str() == s)
            .ok_or_else(|| UnknownTask(s.to_string()))
    }
}

/// Task id that is not registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown AI task: {0}")]
pub struct UnknownTask(pub String);

// =============================================================================
// Shapes
// =============================================================================

/// Key contract for a JSON-object task.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSchema {
    pub name: String,
    /// Top-level keys every parsed object must carry
    pub required: Vec<String>,
}

impl ObjectSchema {
    /// Derive the contract from a documented result type.
    pub fn of<T: JsonSchema>() -> Self {
        let schema = serde_json::to_value(schema_for!(T)).unwrap_or_default();

        let required = schema
            .get("required")
            .and_then(|r| r.as_array())
            .map(|keys| {
                keys.iter()
                    .filter_map(|k| k.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name: T::schema_name(),
            required,
        }
    }
}

/// Output contract of a task.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpectedShape {
    FreeText,
    LineList,
    JsonObject(ObjectSchema),
}

// =============================================================================
// Arguments and specs
// =============================================================================

/// User-supplied template arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptArgs(BTreeMap<String, String>);

impl PromptArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert only when a value is present.
    pub fn with_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value for `key`, or empty when absent.
    fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }
}

/// Registry entry for one task.
#[derive(Clone)]
pub struct PromptSpec {
    pub task: TaskId,
    pub system_prompt: &'static str,
    pub user_prompt: fn(&PromptArgs) -> String,
    pub shape: ExpectedShape,
}

impl fmt::Debug for PromptSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptSpec")
            .field("task", &self.task)
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

/// Prompts ready to send, plus the shape to interpret the answer with.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltPrompt {
    pub system_prompt: String,
    pub user_prompt: String,
    pub shape: ExpectedShape,
}

/// Immutable after construction.
#[derive(Debug, Clone)]
pub struct PromptRegistry {
    specs: HashMap<TaskId, PromptSpec>,
}

impl PromptRegistry {
    /// Registry holding every task.
    pub fn standard() -> Self {
        Self::with_specs(vec![
            PromptSpec {
                task: TaskId::SearchSuggestions,
                system_prompt: SEARCH_SUGGESTIONS_SYSTEM,
                user_prompt: search_suggestions_prompt,
                shape: ExpectedShape::LineList,
            },
            PromptSpec {
                task: TaskId::SearchQueries,
                system_prompt: SEARCH_QUERIES_SYSTEM,
                user_prompt: search_queries_prompt,
                shape: ExpectedShape::LineList,
            },
            PromptSpec {
                task: TaskId::EntityExtraction,
                system_prompt: ENTITY_EXTRACTION_SYSTEM,
                user_prompt: entity_extraction_prompt,
                shape: ExpectedShape::JsonObject(ObjectSchema::of::<ExtractedEntities>()),
            },
            PromptSpec {
                task: TaskId::EmailAnalysis,
                system_prompt: EMAIL_ANALYSIS_SYSTEM,
                user_prompt: email_analysis_prompt,
                shape: ExpectedShape::JsonObject(ObjectSchema::of::<EmailAnalysis>()),
            },
            PromptSpec {
                task: TaskId::DomainAnalysis,
                system_prompt: DOMAIN_ANALYSIS_SYSTEM,
                user_prompt: domain_analysis_prompt,
                shape: ExpectedShape::JsonObject(ObjectSchema::of::<DomainAnalysis>()),
            },
            PromptSpec {
                task: TaskId::InvestigationPlan,
                system_prompt: INVESTIGATION_PLAN_SYSTEM,
                user_prompt: investigation_plan_prompt,
                shape: ExpectedShape::JsonObject(ObjectSchema::of::<InvestigationPlan>()),
            },
            PromptSpec {
                task: TaskId::Report,
                system_prompt: REPORT_SYSTEM,
                user_prompt: report_prompt,
                shape: ExpectedShape::FreeText,
            },
            PromptSpec {
                task: TaskId::Generate,
                system_prompt: GENERATE_SYSTEM,
                user_prompt: generate_prompt,
                shape: ExpectedShape::FreeText,
            },
        ])
    }

    /// Registry holding only the given specs. Later duplicates win.
    pub fn with_specs(specs: impl IntoIterator<Item = PromptSpec>) -> Self {
        Self {
            specs: specs.into_iter().map(|spec| (spec.task, spec)).collect(),
        }
    }

    pub fn spec(&self, task: TaskId) -> Result<&PromptSpec, UnknownTask> {
        self.specs
            .get(&task)
            .ok_or_else(|| UnknownTask(task.to_string()))
    }

    pub fn shape(&self, task: TaskId) -> Result<&ExpectedShape, UnknownTask> {
        self.spec(task).map(|spec| &spec.shape)
    }

    /// Render the system and user prompts for a task.
    pub fn build(&self, task: TaskId, args: &PromptArgs) -> Result<BuiltPrompt, UnknownTask> {
        let spec = self.spec(task)?;

        let system_prompt = match (task, args.get(SYSTEM_PROMPT_ARG)) {
            (TaskId::Generate, Some(custom)) if !custom.trim().is_empty() => custom.to_string(),
            _ => spec.system_prompt.to_string(),
        };

        Ok(BuiltPrompt {
            system_prompt,
            user_prompt: (spec.user_prompt)(args),
            shape: spec.shape.clone(),
        })
    }
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Argument name for the caller-supplied system prompt of `TaskId::Generate`.
pub const SYSTEM_PROMPT_ARG: &str = "system_prompt";

// =============================================================================
// System prompts
// =============================================================================

const SEARCH_SUGGESTIONS_SYSTEM: &str = "You are an OSINT (open-source intelligence) search specialist. \
Given a subject, you write advanced search engine queries (Google dorks) that surface public \
information about it: site: filters for social networks and code hosts, filetype: filters for \
documents, and quoted exact-match phrases. Output one query per line. Do not number the lines, \
do not add bullets, explanations or any other text.";

const SEARCH_QUERIES_SYSTEM: &str = "You are an OSINT investigator planning web searches. \
Given a target and its type (person, company, username, email, domain or general), write \
search engine queries that would locate public records, social media accounts, leaked \
documents, news coverage and technical footprints. Output one query per line with no \
numbering, bullets or commentary.";

const ENTITY_EXTRACTION_SYSTEM: &str = "You are an information extraction engine for OSINT analysts. \
Extract every entity from the supplied text. Respond ONLY with a JSON object with exactly these \
keys, each holding an array of unique strings (empty when nothing was found): \
\"emails\", \"domains\", \"ipAddresses\", \"usernames\", \"phoneNumbers\", \"names\", \
\"organizations\". Do not wrap the JSON in markdown and do not add commentary.";

const EMAIL_ANALYSIS_SYSTEM: &str = "You are an OSINT analyst assessing email addresses. \
Judge the address from its structure and domain alone; do not invent breach data. Respond ONLY \
with a JSON object with these keys: \"emailType\" (one of personal, corporate, disposable, role, \
unknown), \"riskLevel\" (low, medium or high), \"indicators\" (array of strings), \
\"recommendedChecks\" (array of strings naming follow-up lookups), \"summary\" (string). \
Do not wrap the JSON in markdown and do not add commentary.";

const DOMAIN_ANALYSIS_SYSTEM: &str = "You are an OSINT analyst assessing internet domains. \
Reason about the domain name, its TLD and likely purpose; do not fabricate WHOIS or DNS records. \
Respond ONLY with a JSON object with these keys: \"category\" (string), \"riskLevel\" \
(low, medium or high), \"indicators\" (array of strings), \"infrastructureNotes\" (array of \
strings), \"recommendedChecks\" (array of strings), \"summary\" (string). Do not wrap the JSON \
in markdown and do not add commentary.";

const INVESTIGATION_PLAN_SYSTEM: &str = "You are a senior OSINT investigator who writes \
investigation plans limited to lawful, publicly available sources. Respond ONLY with a JSON \
object with these keys: \"objectives\" (array of strings), \"phases\" (array of objects with \
\"name\" string, \"actions\" array of strings and \"tools\" array of strings), \
\"legalConsiderations\" (array of strings), \"estimatedDuration\" (string). Do not wrap the \
JSON in markdown and do not add commentary.";

const REPORT_SYSTEM: &str = "You are an OSINT analyst writing an investigation report for a \
non-technical reader. Organise the supplied findings into an executive summary, key findings, \
risk assessment and recommended next steps. State uncertainty plainly and never invent facts \
that are not in the findings.";

const GENERATE_SYSTEM: &str = "You are a helpful assistant for open-source intelligence \
research. Answer accurately and concisely, recommend only legal and ethical techniques, and \
say so when you do not know.";

// =============================================================================
// User prompt templates
// =============================================================================

fn search_suggestions_prompt(args: &PromptArgs) -> String {
    format!(
        "Generate 8 advanced search queries to investigate: {}",
        args.value("query")
    )
}

fn search_queries_prompt(args: &PromptArgs) -> String {
    format!(
        "Target: {}\nTarget type: {}\nGenerate 10 search queries.",
        args.value("target"),
        args.get("type").unwrap_or("general")
    )
}

fn entity_extraction_prompt(args: &PromptArgs) -> String {
    format!("Extract entities from this text:\n\n{}", args.value("text"))
}

fn email_analysis_prompt(args: &PromptArgs) -> String {
    format!("Analyze this email address: {}", args.value("email"))
}

fn domain_analysis_prompt(args: &PromptArgs) -> String {
    format!("Analyze this domain: {}", args.value("domain"))
}

fn investigation_plan_prompt(args: &PromptArgs) -> String {
    let mut prompt = format!(
        "Create an investigation plan for target: {}",
        args.value("target")
    );
    if let Some(context) = args.get("context").filter(|c| !c.trim().is_empty()) {
        prompt.push_str("\nAdditional context: ");
        prompt.push_str(context);
    }
    prompt
}

fn report_prompt(args: &PromptArgs) -> String {
    let mut prompt = String::new();
    if let Some(target) = args.get("target").filter(|t| !t.trim().is_empty()) {
        prompt.push_str("Investigation target: ");
        prompt.push_str(target);
        prompt.push_str("\n\n");
    }
    prompt.push_str("Findings:\n");
    prompt.push_str(args.value("findings"));
    prompt
}

fn generate_prompt(args: &PromptArgs) -> String {
    args.value("prompt").to_string()
}
