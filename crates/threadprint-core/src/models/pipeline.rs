//! Combined pipeline result and stage attribution types.

use serde::{Deserialize, Serialize};

use super::analysis::MaterialAnalysisResult;
use super::estimate::SustainabilityEstimate;
use super::research::ResearchSnippet;

/// One of the three sequential pipeline steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Analysis,
    Research,
    Estimation,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analysis => "analysis",
            Self::Research => "research",
            Self::Estimation => "estimation",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal condition recorded against a stage. Fatal failures never
/// appear here — they abort the run instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageError {
    pub stage: Stage,
    pub message: String,
}

impl StageError {
    pub fn new(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

/// The orchestrator's sole output: every stage's result plus any
/// recorded non-fatal errors. Built fresh per `run` invocation and
/// owned exclusively by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub material_analysis: MaterialAnalysisResult,
    pub research: Vec<ResearchSnippet>,
    pub sustainability: Vec<SustainabilityEstimate>,
    pub errors: Vec<StageError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_serializes_lowercase() {
        let entry = StageError::new(Stage::Research, "provider unavailable");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["stage"], "research");
        assert_eq!(json["message"], "provider unavailable");
    }

    #[test]
    fn test_pipeline_result_top_level_keys() {
        let result = PipelineResult {
            material_analysis: MaterialAnalysisResult::default(),
            research: vec![],
            sustainability: vec![],
            errors: vec![],
        };
        let json = serde_json::to_value(&result).unwrap();
        for key in ["material_analysis", "research", "sustainability", "errors"] {
            assert!(json.get(key).is_some(), "missing top-level key '{}'", key);
        }
    }
}
