//! Completion provider interface.
//!
//! Agents never talk to a concrete API directly — they hold an injected
//! `CompletionProvider` with a single capability, `complete`. The real
//! implementation is the OpenAI-compatible client in `openai`; tests
//! inject deterministic doubles.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AgentError;

pub mod openai;

pub use openai::OpenAiClient;

/// A chat-completion-capable provider.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AgentError>;
}

/// One part of the user message. Vision requests mix an image part with
/// an instruction text part; text-only requests carry a single text part.
#[derive(Debug, Clone)]
pub enum ContentPart {
    Text(String),
    ImageUrl(String),
}

/// A single-turn completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model ID (e.g., "gpt-4o-mini")
    pub model: String,

    /// System prompt; empty means none
    pub system_prompt: String,

    /// User message content parts, in order
    pub user_parts: Vec<ContentPart>,

    /// Sampling temperature
    pub temperature: Option<f64>,
}

/// Response from a completion call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The assistant's text content
    pub content: String,

    /// Model the provider reports having used
    pub model: String,

    /// Token usage, when the provider reports it
    pub usage: Option<UsageInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageInfo {
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
}
