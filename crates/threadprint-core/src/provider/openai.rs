//! OpenAI-compatible chat-completions client.
//!
//! POST {base_url}/v1/chat/completions
//! Headers:
//!   Authorization: Bearer {api_key}
//!   content-type: application/json
//!
//! Works against api.openai.com and any gateway that speaks the same
//! wire format. Vision requests send the user content as an array of
//! typed parts; plain text requests send a bare string.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::provider::{
    CompletionProvider, CompletionRequest, CompletionResponse, ContentPart, UsageInfo,
};

/// Bound on a single provider round-trip. Expiry surfaces as a
/// `Provider` error, never a hang.
pub const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(120);

/// How much of an error response body to carry into the error message.
const ERROR_BODY_EXCERPT: usize = 300;

pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AgentError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        );
        let body = build_body(&request);

        tracing::info!("[OpenAiClient] POST {} (model: {})", url, request.model);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::Provider(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| AgentError::Provider(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(AgentError::Provider(format!(
                "API returned {}: {}",
                status,
                excerpt(&response_text)
            )));
        }

        let json: serde_json::Value = serde_json::from_str(&response_text)
            .map_err(|e| AgentError::Provider(format!("Failed to parse response JSON: {}", e)))?;

        let content = json
            .get("choices")
            .and_then(|c| c.as_array())
            .and_then(|arr| arr.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|msg| msg.get("content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| {
                AgentError::Provider("response contains no message content".to_string())
            })?
            .to_string();

        let usage = json.get("usage").map(|u| UsageInfo {
            input_tokens: u
                .get("prompt_tokens")
                .or_else(|| u.get("input_tokens"))
                .and_then(|v| v.as_u64()),
            output_tokens: u
                .get("completion_tokens")
                .or_else(|| u.get("output_tokens"))
                .and_then(|v| v.as_u64()),
        });

        let model = json
            .get("model")
            .and_then(|m| m.as_str())
            .unwrap_or(&request.model)
            .to_string();

        Ok(CompletionResponse {
            content,
            model,
            usage,
        })
    }
}

/// Build the request body. Text-only user content goes out as a bare
/// string; anything with an image becomes an array of typed parts.
fn build_body(request: &CompletionRequest) -> serde_json::Value {
    let mut messages = Vec::new();

    if !request.system_prompt.is_empty() {
        messages.push(serde_json::json!({
            "role": "system",
            "content": request.system_prompt
        }));
    }

    let has_image = request
        .user_parts
        .iter()
        .any(|p| matches!(p, ContentPart::ImageUrl(_)));

    let user_content = if has_image {
        let parts: Vec<serde_json::Value> = request
            .user_parts
            .iter()
            .map(|part| match part {
                ContentPart::Text(text) => serde_json::json!({
                    "type": "text",
                    "text": text
                }),
                ContentPart::ImageUrl(url) => serde_json::json!({
                    "type": "image_url",
                    "image_url": { "url": url }
                }),
            })
            .collect();
        serde_json::Value::Array(parts)
    } else {
        let text = request
            .user_parts
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text(text) => Some(text.as_str()),
                ContentPart::ImageUrl(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        serde_json::Value::String(text)
    };

    messages.push(serde_json::json!({
        "role": "user",
        "content": user_content
    }));

    let mut body = serde_json::json!({
        "model": request.model,
        "messages": messages
    });

    if let Some(temp) = request.temperature {
        body["temperature"] = serde_json::Value::Number(
            serde_json::Number::from_f64(temp).unwrap_or_else(|| serde_json::Number::from(0)),
        );
    }

    body
}

fn excerpt(s: &str) -> String {
    if s.chars().count() <= ERROR_BODY_EXCERPT {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(ERROR_BODY_EXCERPT).collect();
        format!("{}...", truncated)
    }
}
