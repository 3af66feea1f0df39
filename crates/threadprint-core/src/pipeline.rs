//! Sequential two-agent pipeline: analyze the photo, research the
//! materials, estimate the sustainability impact.
//!
//! Analysis and estimation failures abort the run with the stage attached.
//! Research never aborts; its problems are recorded on the result instead.

use std::sync::Arc;

use crate::agents::{MaterialAnalyzer, SustainabilityEstimator};
use crate::config::Settings;
use crate::error::{AgentError, StageFailure};
use crate::models::{PipelineResult, Stage, StageError};
use crate::provider::{CompletionProvider, OpenAiClient};
use crate::research::{ResearchLookup, ResearchOutcome};
use crate::search::{SearchProvider, TavilyClient};

pub struct Pipeline {
    analyzer: MaterialAnalyzer,
    research: ResearchLookup,
    estimator: SustainabilityEstimator,
}

impl Pipeline {
    pub fn new(
        analyzer: MaterialAnalyzer,
        research: ResearchLookup,
        estimator: SustainabilityEstimator,
    ) -> Self {
        Self {
            analyzer,
            research,
            estimator,
        }
    }

    /// Wires the pipeline from settings. Fails with a configuration error
    /// when no OpenAI key is present; a missing Tavily key only disables
    /// the research stage.
    pub fn from_settings(settings: &Settings) -> Result<Self, AgentError> {
        let api_key = settings.require_openai_key()?;
        let provider: Arc<dyn CompletionProvider> =
            Arc::new(OpenAiClient::new(&settings.openai_base_url, api_key));
        let search: Option<Arc<dyn SearchProvider>> = settings
            .tavily_api_key
            .as_deref()
            .map(|key| Arc::new(TavilyClient::new(key)) as Arc<dyn SearchProvider>);

        Ok(Self {
            analyzer: MaterialAnalyzer::new(
                provider.clone(),
                &settings.fashion_analyzer_model,
            ),
            research: ResearchLookup::new(search),
            estimator: SustainabilityEstimator::new(
                provider,
                &settings.sustainability_analyzer_model,
            ),
        })
    }

    /// Runs the full pipeline against one garment photo.
    pub async fn run(
        &self,
        image_reference: &str,
        focus_hint: Option<&str>,
    ) -> Result<PipelineResult, StageFailure> {
        tracing::info!("[Pipeline] Stage 1/3: material analysis");
        let analysis = self
            .analyzer
            .analyze(image_reference, focus_hint)
            .await
            .map_err(|e| StageFailure::new(Stage::Analysis, e))?;

        let mut errors: Vec<StageError> = Vec::new();
        for warning in analysis.fraction_warnings() {
            tracing::warn!("[Pipeline] {}", warning);
            errors.push(StageError::new(Stage::Analysis, warning));
        }

        tracing::info!("[Pipeline] Stage 2/3: lifecycle research");
        let ResearchOutcome { snippets, degraded } = self.research.lookup(&analysis).await;
        if let Some(reason) = degraded {
            errors.push(StageError::new(Stage::Research, reason));
        }

        tracing::info!("[Pipeline] Stage 3/3: sustainability estimation");
        let sustainability = self
            .estimator
            .estimate(&analysis, &snippets)
            .await
            .map_err(|e| StageFailure::new(Stage::Estimation, e))?;

        tracing::info!(
            "[Pipeline] Done: {} garment(s), {} snippet(s), {} warning(s)",
            analysis.garments.len(),
            snippets.len(),
            errors.len()
        );

        Ok(PipelineResult {
            material_analysis: analysis,
            research: snippets,
            sustainability,
            errors,
        })
    }
}
