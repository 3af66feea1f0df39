//! The two model-backed agents and their shared reply parsing.

pub mod material_analyzer;
pub mod sustainability_estimator;

pub use material_analyzer::MaterialAnalyzer;
pub use sustainability_estimator::SustainabilityEstimator;

use serde::de::DeserializeOwned;

use crate::error::AgentError;

/// Locates the JSON object inside a model reply. Models are instructed to
/// answer with bare JSON but often wrap it in markdown fences or prose.
fn extract_json_document(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&content[start..=end])
}

/// Deserializes a model reply into the agent's wire type. `field` names the
/// hand-off being validated and ends up in the error message.
fn parse_agent_reply<T: DeserializeOwned>(field: &str, content: &str) -> Result<T, AgentError> {
    let document = extract_json_document(content)
        .ok_or_else(|| AgentError::schema(field, "reply contains no JSON object"))?;
    serde_json::from_str(document).map_err(|e| AgentError::schema(field, format!("{}", e)))
}
