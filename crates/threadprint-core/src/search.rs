//! Web-search provider interface and the Tavily implementation.
//!
//! POST https://api.tavily.com/search
//! Body: { "api_key": …, "query": …, "max_results": … }
//!
//! Search grounds the sustainability estimate; it is always optional and
//! the research stage degrades to zero snippets when it is absent.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::AgentError;
use crate::models::ResearchSnippet;

const TAVILY_API_URL: &str = "https://api.tavily.com/search";

/// Bound on a single search round-trip.
const SEARCH_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// A ranked web-search provider.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<ResearchSnippet>, AgentError>;
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    url: String,
    content: String,
}

pub struct TavilyClient {
    client: reqwest::Client,
    api_key: String,
}

impl TavilyClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(SEARCH_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<ResearchSnippet>, AgentError> {
        let body = serde_json::json!({
            "api_key": self.api_key,
            "query": query,
            "max_results": max_results,
        });

        tracing::info!("[TavilyClient] Searching: {}", query);

        let response = self
            .client
            .post(TAVILY_API_URL)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::Provider(format!("Search request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentError::Provider(format!(
                "Search API returned {}",
                status
            )));
        }

        let parsed: TavilyResponse = response
            .json()
            .await
            .map_err(|e| AgentError::Provider(format!("Failed to parse search response: {}", e)))?;

        Ok(parsed
            .results
            .into_iter()
            .map(|r| ResearchSnippet {
                source_url: r.url,
                excerpt: r.content,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tavily_response_parses_into_snippets() {
        let raw = r#"{
            "query": "Lifecycle assessment cotton",
            "results": [
                {"title": "LCA of cotton", "url": "https://example.org/lca", "content": "Cotton uses ~10,000 L water per kg.", "score": 0.91},
                {"title": "Textile energy", "url": "https://example.org/energy", "content": "Spinning consumes 1-2 kWh/kg.", "score": 0.84}
            ]
        }"#;
        let parsed: TavilyResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].url, "https://example.org/lca");
        assert!(parsed.results[1].content.contains("kWh"));
    }

    #[test]
    fn test_tavily_response_without_results_is_empty() {
        let parsed: TavilyResponse = serde_json::from_str(r#"{"query": "x"}"#).unwrap();
        assert!(parsed.results.is_empty());
    }
}
