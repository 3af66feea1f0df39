//! Research stage: turn an analysis result into lifecycle-assessment
//! context snippets for the estimator.
//!
//! This stage never fails the pipeline. A missing provider or a search
//! error degrades the run to zero snippets and surfaces as a recorded
//! warning on the final result.

use std::sync::Arc;

use crate::models::{MaterialAnalysisResult, ResearchSnippet};
use crate::search::SearchProvider;

/// Upper bound on snippets handed to the estimator.
pub const MAX_SNIPPETS: usize = 5;

/// How many distinct materials feed the search query.
const QUERY_MATERIAL_LIMIT: usize = 3;

const QUERY_PREFIX: &str = "Lifecycle assessment water CO2 energy consumption for ";

/// What the research stage produced, including why it came up short.
#[derive(Debug, Default)]
pub struct ResearchOutcome {
    pub snippets: Vec<ResearchSnippet>,
    /// Present when the stage ran in degraded mode (no provider, or the
    /// provider failed). The message is recorded on the pipeline result.
    pub degraded: Option<String>,
}

pub struct ResearchLookup {
    provider: Option<Arc<dyn SearchProvider>>,
}

impl ResearchLookup {
    pub fn new(provider: Option<Arc<dyn SearchProvider>>) -> Self {
        Self { provider }
    }

    /// A lookup with no provider at all. Every call degrades.
    pub fn disabled() -> Self {
        Self { provider: None }
    }

    pub async fn lookup(&self, analysis: &MaterialAnalysisResult) -> ResearchOutcome {
        let provider = match &self.provider {
            Some(p) => p,
            None => {
                let message =
                    "web search disabled; set TAVILY_API_KEY to ground estimates in lifecycle data"
                        .to_string();
                tracing::warn!("[ResearchLookup] {}", message);
                return ResearchOutcome {
                    snippets: Vec::new(),
                    degraded: Some(message),
                };
            }
        };

        let query = match Self::build_query(analysis) {
            Some(q) => q,
            None => {
                tracing::info!("[ResearchLookup] No materials to research, skipping search");
                return ResearchOutcome::default();
            }
        };

        match provider.search(&query, MAX_SNIPPETS).await {
            Ok(mut snippets) => {
                snippets.truncate(MAX_SNIPPETS);
                tracing::info!(
                    "[ResearchLookup] Retrieved {} snippet(s) for query: {}",
                    snippets.len(),
                    query
                );
                ResearchOutcome {
                    snippets,
                    degraded: None,
                }
            }
            Err(e) => {
                let message = format!("web search failed: {}", e);
                tracing::warn!("[ResearchLookup] {}", message);
                ResearchOutcome {
                    snippets: Vec::new(),
                    degraded: Some(message),
                }
            }
        }
    }

    /// Builds the lifecycle query from the most prominent materials.
    /// Returns `None` when the analysis names no materials at all.
    fn build_query(analysis: &MaterialAnalysisResult) -> Option<String> {
        let materials = analysis.material_names();
        if materials.is_empty() {
            return None;
        }
        let top: Vec<&str> = materials
            .iter()
            .take(QUERY_MATERIAL_LIMIT)
            .map(String::as_str)
            .collect();
        Some(format!("{}{}", QUERY_PREFIX, top.join(", ")))
    }
}
