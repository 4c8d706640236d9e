use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::llm::deepseek::DeepSeekClient;
use crate::llm::prompts::build_summary_prompt;

/// Output token cap for a single summary.
pub const SUMMARY_MAX_TOKENS: u32 = 150;

/// Sampling temperature for summaries.
pub const SUMMARY_TEMPERATURE: f32 = 0.7;

/// Chat-completions request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl CompletionRequest {
    /// Single-turn summary request for `transcript`.
    pub fn summary(model: &str, transcript: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_summary_prompt(transcript),
            }],
            max_tokens: SUMMARY_MAX_TOKENS,
            temperature: SUMMARY_TEMPERATURE,
        }
    }

    /// The user prompt carried by this request.
    pub fn prompt(&self) -> &str {
        self.messages
            .first()
            .map(|m| m.content.as_str())
            .unwrap_or_default()
    }
}

/// Status and raw body of an upstream call, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReply {
    pub status: StatusCode,
    pub body: String,
}

/// Chat-completions response body. Only the first choice is read; `null`
/// anywhere on the path to its content reads as absent.
#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Option<Vec<Option<CompletionChoice>>>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub message: Option<CompletionMessage>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    pub content: Option<String>,
}

impl CompletionResponse {
    /// `choices[0].message.content`, when present.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .as_deref()
            .and_then(|choices| choices.first())
            .and_then(Option::as_ref)
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
    }
}

/// A completion backend. Transport failures are errors; any HTTP status is a reply.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn complete(&self, api_key: &str, request: &CompletionRequest) -> Result<ProviderReply>;
}

/// Build an LLM provider from runtime settings.
pub fn build_provider(settings: &Settings) -> Result<Arc<dyn LlmProvider>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "deepseek" => Ok(Arc::new(DeepSeekClient::from_settings(settings)?)),
        other => anyhow::bail!(
            "Unsupported llm.provider '{}'. Supported providers: deepseek",
            other
        ),
    }
}
