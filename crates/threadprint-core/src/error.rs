//! Core error types for the Threadprint pipeline.
//!
//! `AgentError` is the taxonomy shared by the providers and agents;
//! `StageFailure` attributes a fatal `AgentError` to the pipeline stage
//! that raised it, which is what `Pipeline::run` returns on failure.

use crate::models::Stage;

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Network or provider failure: timeout, non-2xx status, or a
    /// transport response that cannot be read.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The provider responded, but the content does not parse into the
    /// expected entity shape.
    #[error("Schema validation failed for '{field}': {detail}")]
    SchemaValidation { field: String, detail: String },

    /// The sustainability output is missing estimates for one or more
    /// input garments.
    #[error("No estimate returned for garment(s): {}", .missing.join(", "))]
    IncompleteEstimate { missing: Vec<String> },

    /// A required credential or setting is absent at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AgentError {
    pub fn schema(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::SchemaValidation {
            field: field.into(),
            detail: detail.into(),
        }
    }
}

/// A fatal pipeline failure: which stage failed and why.
///
/// Research-stage errors never become a `StageFailure` — they are
/// downgraded to recorded `StageError` entries in the result.
#[derive(Debug, thiserror::Error)]
#[error("{stage} stage failed: {source}")]
pub struct StageFailure {
    pub stage: Stage,
    #[source]
    pub source: AgentError,
}

impl StageFailure {
    pub fn new(stage: Stage, source: AgentError) -> Self {
        Self { stage, source }
    }
}
