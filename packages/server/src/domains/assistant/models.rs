//! Documented result shapes for the JSON-object tasks.
//!
//! These types are the source of the key lists the interpreter enforces.
//! Values are forwarded to clients as parsed JSON, not re-serialized from
//! these structs, so providers may add extra keys.

use schemars::JsonSchema;

/// `POST /api/ai/analyze-email`
#[derive(Debug, Clone, JsonSchema)]
#[schemars(rename_all = "camelCase")]
pub struct EmailAnalysis {
    /// "personal", "corporate", "disposable", "role" or "unknown"
    pub email_type: String,
    /// "low", "medium" or "high"
    pub risk_level: String,
    pub indicators: Vec<String>,
    pub recommended_checks: Vec<String>,
    pub summary: String,
}

/// `POST /api/ai/analyze-domain`
#[derive(Debug, Clone, JsonSchema)]
#[schemars(rename_all = "camelCase")]
pub struct DomainAnalysis {
    pub category: String,
    pub risk_level: String,
    pub indicators: Vec<String>,
    pub infrastructure_notes: Vec<String>,
    pub recommended_checks: Vec<String>,
    pub summary: String,
}

/// One phase of an investigation plan.
#[derive(Debug, Clone, JsonSchema)]
pub struct PlanPhase {
    pub name: String,
    pub actions: Vec<String>,
    pub tools: Vec<String>,
}

/// `POST /api/ai/investigation-plan`
#[derive(Debug, Clone, JsonSchema)]
#[schemars(rename_all = "camelCase")]
pub struct InvestigationPlan {
    pub objectives: Vec<String>,
    pub phases: Vec<PlanPhase>,
    pub legal_considerations: Vec<String>,
    pub estimated_duration: String,
}

/// `POST /api/ai/extract-entities`
#[derive(Debug, Clone, JsonSchema)]
#[schemars(rename_all = "camelCase")]
pub struct ExtractedEntities {
    pub emails: Vec<String>,
    pub domains: Vec<String>,
    pub ip_addresses: Vec<String>,
    pub usernames: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub names: Vec<String>,
    pub organizations: Vec<String>,
}
