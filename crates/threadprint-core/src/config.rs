//! Runtime configuration.
//!
//! Settings are read from the environment exactly once at process start
//! and passed into constructors from there — component logic never does
//! ambient env lookups.

use crate::error::AgentError;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Environment-driven settings for the pipeline and its providers.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Required by both completion agents
    pub openai_api_key: Option<String>,

    /// Optional; absence disables the research stage
    pub tavily_api_key: Option<String>,

    /// Model used by the material analyzer (must be vision-capable)
    pub fashion_analyzer_model: String,

    /// Model used by the sustainability estimator
    pub sustainability_analyzer_model: String,

    /// Endpoint override for OpenAI-compatible gateways
    pub openai_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            tavily_api_key: None,
            fashion_analyzer_model: DEFAULT_MODEL.to_string(),
            sustainability_analyzer_model: DEFAULT_MODEL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
        }
    }
}

impl Settings {
    /// Read settings from the process environment. Empty values are
    /// treated the same as unset ones.
    pub fn from_env() -> Self {
        Self {
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            tavily_api_key: non_empty_var("TAVILY_API_KEY"),
            fashion_analyzer_model: non_empty_var("FASHION_ANALYZER_MODEL")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            sustainability_analyzer_model: non_empty_var("SUSTAINABILITY_ANALYZER_MODEL")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            openai_base_url: non_empty_var("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
        }
    }

    /// The completion credential, or a fail-fast configuration error.
    pub fn require_openai_key(&self) -> Result<&str, AgentError> {
        self.openai_api_key.as_deref().ok_or_else(|| {
            AgentError::Configuration(
                "OPENAI_API_KEY is required to run the analysis pipeline".to_string(),
            )
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.fashion_analyzer_model, "gpt-4o-mini");
        assert_eq!(settings.sustainability_analyzer_model, "gpt-4o-mini");
        assert_eq!(settings.openai_base_url, "https://api.openai.com");
        assert!(settings.openai_api_key.is_none());
        assert!(settings.tavily_api_key.is_none());
    }

    #[test]
    fn test_require_openai_key() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.require_openai_key(),
            Err(AgentError::Configuration(_))
        ));

        settings.openai_api_key = Some("sk-test".to_string());
        assert_eq!(settings.require_openai_key().unwrap(), "sk-test");
    }

    #[test]
    fn test_from_env_reads_overrides() {
        std::env::set_var("FASHION_ANALYZER_MODEL", "gpt-4o");
        std::env::set_var("SUSTAINABILITY_ANALYZER_MODEL", "gpt-4.1-mini");
        let settings = Settings::from_env();
        assert_eq!(settings.fashion_analyzer_model, "gpt-4o");
        assert_eq!(settings.sustainability_analyzer_model, "gpt-4.1-mini");
        std::env::remove_var("FASHION_ANALYZER_MODEL");
        std::env::remove_var("SUSTAINABILITY_ANALYZER_MODEL");
    }
}
