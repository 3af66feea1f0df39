//! Agent A: extracts garment and material composition from a photo.

use std::sync::Arc;

use crate::agents::parse_agent_reply;
use crate::error::AgentError;
use crate::models::MaterialAnalysisResult;
use crate::provider::{CompletionProvider, CompletionRequest, ContentPart};

const SYSTEM_PROMPT: &str = "\
You are an expert textile analyst. You identify every distinct garment in a \
photo, its material composition, and realistic weight estimates.

Respond with a single JSON object and nothing else, matching exactly:
{
  \"garments\": [
    {
      \"garment_name\": \"<short descriptive name>\",
      \"materials\": [
        {\"material_name\": \"<fiber or fabric>\", \"weight_fraction\": <0.0-1.0>, \"weight_grams\": <number or null>}
      ],
      \"confidence\": <0.0-1.0 or null>
    }
  ],
  \"notes\": \"<observations worth passing on, or null>\"
}

Weight fractions within each garment must sum to roughly 1.0. If the photo \
contains no garments, return an empty garments array.";

pub struct MaterialAnalyzer {
    provider: Arc<dyn CompletionProvider>,
    model: String,
}

impl MaterialAnalyzer {
    pub fn new(provider: Arc<dyn CompletionProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Analyzes a garment photo. `image_reference` is an HTTP(S) URL or a
    /// `data:` URI the vision model can fetch inline.
    pub async fn analyze(
        &self,
        image_reference: &str,
        focus_hint: Option<&str>,
    ) -> Result<MaterialAnalysisResult, AgentError> {
        tracing::info!("[MaterialAnalyzer] Analyzing photo (model: {})", self.model);

        let mut instruction =
            String::from("Identify the garments in this photo and their material composition.");
        if let Some(hint) = focus_hint {
            instruction.push_str(&format!(" Pay particular attention to: {}", hint));
        }

        let request = CompletionRequest {
            model: self.model.clone(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_parts: vec![
                ContentPart::ImageUrl(image_reference.to_string()),
                ContentPart::Text(instruction),
            ],
            temperature: Some(0.0),
        };

        let response = self.provider.complete(request).await?;
        let analysis: MaterialAnalysisResult =
            parse_agent_reply("material_analysis", &response.content)?;
        validate(&analysis)?;

        tracing::info!(
            "[MaterialAnalyzer] Identified {} garment(s)",
            analysis.garments.len()
        );
        if let Some(usage) = &response.usage {
            tracing::debug!(
                "[MaterialAnalyzer] Tokens: input={:?} output={:?}",
                usage.input_tokens,
                usage.output_tokens
            );
        }

        Ok(analysis)
    }
}

/// Checks the parsed reply beyond what deserialization enforces: names must
/// be non-empty and fractions must be valid proportions.
fn validate(analysis: &MaterialAnalysisResult) -> Result<(), AgentError> {
    for (gi, garment) in analysis.garments.iter().enumerate() {
        if garment.garment_name.trim().is_empty() {
            return Err(AgentError::schema(
                format!("garments[{}].garment_name", gi),
                "must not be empty",
            ));
        }
        for (mi, share) in garment.materials.iter().enumerate() {
            if share.material_name.trim().is_empty() {
                return Err(AgentError::schema(
                    format!("garments[{}].materials[{}].material_name", gi, mi),
                    "must not be empty",
                ));
            }
            if !share.weight_fraction.is_finite()
                || !(0.0..=1.0).contains(&share.weight_fraction)
            {
                return Err(AgentError::schema(
                    format!("garments[{}].materials[{}].weight_fraction", gi, mi),
                    format!("{} is not a fraction in [0, 1]", share.weight_fraction),
                ));
            }
        }
    }
    Ok(())
}
