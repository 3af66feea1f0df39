//! Agent B: turns a material analysis plus research snippets into
//! per-garment sustainability estimates.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use serde::Deserialize;

use crate::agents::parse_agent_reply;
use crate::error::AgentError;
use crate::models::{MaterialAnalysisResult, ResearchSnippet, SustainabilityEstimate};
use crate::provider::{CompletionProvider, CompletionRequest, ContentPart};

const SYSTEM_PROMPT: &str = "\
You are a sustainability analyst collaborating with a textile analyst. You \
receive structured JSON describing garments and their material composition, \
plus research notes drawn from lifecycle-assessment sources. For EACH garment, \
estimate the production water usage in liters, carbon emissions in kilograms \
of CO2 equivalent, and energy consumption in kilowatt hours. Combine the \
research notes with your domain knowledge and keep the numbers realistic for \
modern apparel supply chains.

Respond with a single JSON object and nothing else, matching exactly:
{
  \"estimates\": [
    {
      \"garment_name\": \"<name from the input, verbatim>\",
      \"water_liters\": <number>,
      \"carbon_kg_co2e\": <number>,
      \"energy_kwh\": <number>,
      \"basis_notes\": \"<short methodology note, or null>\"
    }
  ]
}

Return exactly one entry per input garment, repeating each garment_name \
exactly as given.";

#[derive(Debug, Deserialize)]
struct EstimateReply {
    estimates: Vec<SustainabilityEstimate>,
}

pub struct SustainabilityEstimator {
    provider: Arc<dyn CompletionProvider>,
    model: String,
}

impl SustainabilityEstimator {
    pub fn new(provider: Arc<dyn CompletionProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Produces one estimate per analyzed garment, in the analysis order.
    /// An analysis with no garments yields an empty list without a model call.
    pub async fn estimate(
        &self,
        analysis: &MaterialAnalysisResult,
        snippets: &[ResearchSnippet],
    ) -> Result<Vec<SustainabilityEstimate>, AgentError> {
        if analysis.garments.is_empty() {
            tracing::info!("[SustainabilityEstimator] No garments to estimate, skipping");
            return Ok(Vec::new());
        }

        tracing::info!(
            "[SustainabilityEstimator] Estimating {} garment(s) with {} research snippet(s)",
            analysis.garments.len(),
            snippets.len()
        );

        let request = CompletionRequest {
            model: self.model.clone(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_parts: vec![ContentPart::Text(build_user_message(analysis, snippets))],
            temperature: Some(0.2),
        };

        let response = self.provider.complete(request).await?;
        let reply: EstimateReply = parse_agent_reply("sustainability", &response.content)?;
        if let Some(usage) = &response.usage {
            tracing::debug!(
                "[SustainabilityEstimator] Tokens: input={:?} output={:?}",
                usage.input_tokens,
                usage.output_tokens
            );
        }

        align_to_analysis(analysis, reply.estimates)
    }
}

fn build_user_message(analysis: &MaterialAnalysisResult, snippets: &[ResearchSnippet]) -> String {
    let analysis_json =
        serde_json::to_string_pretty(analysis).unwrap_or_else(|_| "{}".to_string());

    let research_notes = if snippets.is_empty() {
        "No research notes available. Rely on your domain knowledge.".to_string()
    } else {
        snippets
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}. [{}] {}", i + 1, s.source_url, s.excerpt))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "Material analysis JSON:\n{}\n\nRelevant research notes:\n{}",
        analysis_json, research_notes
    )
}

/// Reorders the reply to the analysis order, drops entries for garments the
/// analysis never named, and enforces that every analyzed garment is covered.
/// Repeated garment names consume one reply entry per occurrence; when the
/// model answers a repeated name with a single entry, it serves every
/// occurrence.
fn align_to_analysis(
    analysis: &MaterialAnalysisResult,
    estimates: Vec<SustainabilityEstimate>,
) -> Result<Vec<SustainabilityEstimate>, AgentError> {
    let mut by_name: HashMap<String, VecDeque<SustainabilityEstimate>> = HashMap::new();
    for estimate in estimates {
        by_name
            .entry(estimate.garment_name.clone())
            .or_default()
            .push_back(estimate);
    }

    let mut ordered: Vec<SustainabilityEstimate> = Vec::with_capacity(analysis.garments.len());
    let mut seen_at: HashMap<String, usize> = HashMap::new();
    let mut missing = Vec::new();
    for name in analysis.garment_names() {
        match by_name.get_mut(&name).and_then(VecDeque::pop_front) {
            Some(estimate) => {
                seen_at.insert(name, ordered.len());
                ordered.push(estimate);
            }
            None => match seen_at.get(&name) {
                Some(&earlier) => {
                    let repeat = ordered[earlier].clone();
                    ordered.push(repeat);
                }
                None => missing.push(name),
            },
        }
    }

    if !missing.is_empty() {
        return Err(AgentError::IncompleteEstimate { missing });
    }

    for (name, leftovers) in &by_name {
        if !leftovers.is_empty() {
            tracing::debug!(
                "[SustainabilityEstimator] Dropping {} estimate(s) for unmatched garment '{}'",
                leftovers.len(),
                name
            );
        }
    }

    for estimate in &ordered {
        validate_metrics(estimate)?;
    }

    Ok(ordered)
}

fn validate_metrics(estimate: &SustainabilityEstimate) -> Result<(), AgentError> {
    let checks = [
        ("water_liters", estimate.water_liters),
        ("carbon_kg_co2e", estimate.carbon_kg_co2e),
        ("energy_kwh", estimate.energy_kwh),
    ];
    for (field, value) in checks {
        if !value.is_finite() || value < 0.0 {
            return Err(AgentError::schema(
                field,
                format!(
                    "{} is not a non-negative number (garment '{}')",
                    value, estimate.garment_name
                ),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GarmentMaterial, MaterialShare};
    use crate::provider::CompletionResponse;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct ScriptedProvider {
        reply: String,
        calls: AtomicUsize,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, AgentError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let model = request.model.clone();
            self.requests.lock().unwrap().push(request);
            Ok(CompletionResponse {
                content: self.reply.clone(),
                model,
                usage: None,
            })
        }
    }

    fn analysis(names: &[&str]) -> MaterialAnalysisResult {
        MaterialAnalysisResult {
            garments: names
                .iter()
                .map(|n| GarmentMaterial {
                    garment_name: n.to_string(),
                    materials: vec![MaterialShare {
                        material_name: "cotton".to_string(),
                        weight_fraction: 1.0,
                        weight_grams: None,
                    }],
                    confidence: None,
                })
                .collect(),
            notes: None,
        }
    }

    fn reply_for(names: &[&str]) -> String {
        let entries: Vec<String> = names
            .iter()
            .map(|n| {
                format!(
                    r#"{{"garment_name": "{}", "water_liters": 3000.0, "carbon_kg_co2e": 12.5, "energy_kwh": 40.0, "basis_notes": "cotton LCA averages"}}"#,
                    n
                )
            })
            .collect();
        format!(r#"{{"estimates": [{}]}}"#, entries.join(", "))
    }

    #[tokio::test]
    async fn test_estimates_follow_analysis_order_and_drop_extras() {
        let reply = reply_for(&["trousers", "mystery cape", "shirt"]);
        let provider = Arc::new(ScriptedProvider::new(&reply));
        let estimator = SustainabilityEstimator::new(provider, "gpt-4o-mini");

        let estimates = estimator
            .estimate(&analysis(&["shirt", "trousers"]), &[])
            .await
            .unwrap();

        let names: Vec<&str> = estimates.iter().map(|e| e.garment_name.as_str()).collect();
        assert_eq!(names, vec!["shirt", "trousers"]);
    }

    #[tokio::test]
    async fn test_missing_garment_is_incomplete_estimate() {
        let reply = reply_for(&["shirt"]);
        let provider = Arc::new(ScriptedProvider::new(&reply));
        let estimator = SustainabilityEstimator::new(provider, "gpt-4o-mini");

        let err = estimator
            .estimate(&analysis(&["shirt", "denim jacket"]), &[])
            .await
            .unwrap_err();

        match err {
            AgentError::IncompleteEstimate { missing } => {
                assert_eq!(missing, vec!["denim jacket".to_string()]);
            }
            other => panic!("expected incomplete estimate, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_repeated_garment_names_each_get_an_estimate() {
        let reply = r#"{"estimates": [
            {"garment_name": "t-shirt", "water_liters": 2500.0, "carbon_kg_co2e": 7.0, "energy_kwh": 15.0},
            {"garment_name": "t-shirt", "water_liters": 2700.0, "carbon_kg_co2e": 8.0, "energy_kwh": 18.0}
        ]}"#;
        let provider = Arc::new(ScriptedProvider::new(reply));
        let estimator = SustainabilityEstimator::new(provider, "gpt-4o-mini");

        let estimates = estimator
            .estimate(&analysis(&["t-shirt", "t-shirt"]), &[])
            .await
            .unwrap();

        assert_eq!(estimates.len(), 2);
        assert_eq!(estimates[0].water_liters, 2500.0);
        assert_eq!(estimates[1].water_liters, 2700.0);
    }

    #[tokio::test]
    async fn test_single_estimate_covers_repeated_garments() {
        let reply = reply_for(&["t-shirt"]);
        let provider = Arc::new(ScriptedProvider::new(&reply));
        let estimator = SustainabilityEstimator::new(provider, "gpt-4o-mini");

        let estimates = estimator
            .estimate(&analysis(&["t-shirt", "t-shirt"]), &[])
            .await
            .unwrap();

        assert_eq!(estimates.len(), 2);
        assert_eq!(estimates[0], estimates[1]);
    }

    #[tokio::test]
    async fn test_negative_metric_is_schema_error() {
        let reply = r#"{"estimates": [
            {"garment_name": "shirt", "water_liters": -5.0, "carbon_kg_co2e": 1.0, "energy_kwh": 2.0}
        ]}"#;
        let provider = Arc::new(ScriptedProvider::new(reply));
        let estimator = SustainabilityEstimator::new(provider, "gpt-4o-mini");

        let err = estimator.estimate(&analysis(&["shirt"]), &[]).await.unwrap_err();
        match err {
            AgentError::SchemaValidation { field, .. } => assert_eq!(field, "water_liters"),
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_analysis_skips_the_model() {
        let provider = Arc::new(ScriptedProvider::new("unused"));
        let estimator = SustainabilityEstimator::new(provider.clone(), "gpt-4o-mini");

        let estimates = estimator
            .estimate(&MaterialAnalysisResult::default(), &[])
            .await
            .unwrap();

        assert!(estimates.is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_prompt_includes_analysis_and_research() {
        let reply = reply_for(&["shirt"]);
        let provider = Arc::new(ScriptedProvider::new(&reply));
        let estimator = SustainabilityEstimator::new(provider.clone(), "gpt-4o-mini");

        let snippets = vec![ResearchSnippet {
            source_url: "https://example.org/lca".to_string(),
            excerpt: "Cotton production uses roughly 10,000 liters of water per kilogram."
                .to_string(),
        }];
        estimator.estimate(&analysis(&["shirt"]), &snippets).await.unwrap();

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests[0].temperature, Some(0.2));
        let ContentPart::Text(message) = &requests[0].user_parts[0] else {
            panic!("expected a text part");
        };
        assert!(message.contains("\"garment_name\": \"shirt\""));
        assert!(message.contains("https://example.org/lca"));
    }
}
