//! The summary request handler.
//!
//! `SummaryHandler::handle` turns one request into exactly one response. It
//! never touches the environment or the network directly: the credential is
//! injected at construction and the upstream call goes through `LlmProvider`.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::Settings;
use crate::llm::{build_provider, CompletionRequest, CompletionResponse, LlmProvider};
use crate::server::error::SummarizeError;

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_METHODS: &str = "POST, OPTIONS";
pub const CORS_ALLOW_HEADERS: &str = "Content-Type, Authorization";
pub const CORS_MAX_AGE_SECS: &str = "86400";

/// A request as seen by the handler.
#[derive(Debug, Clone)]
pub struct IncomingRequest {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl IncomingRequest {
    pub fn new(method: Method, body: impl Into<Bytes>) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }
}

/// JSON body of a response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Summary {
        success: bool,
        summary: String,
    },
    Error {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
}

/// A fully built response: status, headers and optional JSON body.
#[derive(Debug, Clone)]
pub struct OutgoingResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Option<ResponseBody>,
}

impl OutgoingResponse {
    pub fn json(status: StatusCode, body: ResponseBody) -> Self {
        Self {
            status,
            headers: cors_headers(false),
            body: Some(body),
        }
    }

    pub fn preflight() -> Self {
        Self {
            status: StatusCode::OK,
            headers: cors_headers(true),
            body: None,
        }
    }

    pub fn summary(summary: String) -> Self {
        Self::json(
            StatusCode::OK,
            ResponseBody::Summary {
                success: true,
                summary,
            },
        )
    }
}

fn cors_headers(preflight: bool) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(CORS_ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(CORS_ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(CORS_ALLOW_HEADERS),
    );
    if preflight {
        headers.insert(
            header::ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from_static(CORS_MAX_AGE_SECS),
        );
    }
    headers
}

#[derive(Debug, Deserialize)]
struct SummaryPayload {
    transcript: Option<Value>,
}

impl SummaryPayload {
    /// Transcript text. `null`, `false` and `0` count as absent; any other
    /// non-string value is rejected.
    fn transcript(self) -> Result<String> {
        match self.transcript {
            None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(String::new()),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(String::new()),
            Some(Value::String(text)) => Ok(text),
            Some(other) => anyhow::bail!("transcript must be a string, got {}", other),
        }
    }
}

/// Process-wide values the handler needs.
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    pub api_key: Option<String>,
    pub model: String,
}

impl HandlerConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            api_key: settings.api_key(),
            model: settings.llm.model.trim().to_string(),
        }
    }
}

pub struct SummaryHandler {
    provider: Arc<dyn LlmProvider>,
    config: HandlerConfig,
}

impl SummaryHandler {
    pub fn new(provider: Arc<dyn LlmProvider>, config: HandlerConfig) -> Self {
        Self { provider, config }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(
            build_provider(settings)?,
            HandlerConfig::from_settings(settings),
        ))
    }

    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Handle one request.
    pub async fn handle(&self, request: IncomingRequest) -> OutgoingResponse {
        if request.method == Method::OPTIONS {
            return OutgoingResponse::preflight();
        }
        if request.method != Method::POST {
            return SummarizeError::MethodNotAllowed.into();
        }

        match self.summarize_body(&request.body).await {
            Ok(summary) => OutgoingResponse::summary(summary),
            Err(err) => err.into(),
        }
    }

    async fn summarize_body(&self, body: &[u8]) -> Result<String, SummarizeError> {
        let payload: SummaryPayload =
            serde_json::from_slice(body).context("Invalid JSON request body")?;
        let transcript = payload.transcript()?;

        self.summarize(&transcript).await
    }

    /// Summarize a transcript. Returns the trimmed summary text, which is
    /// empty when upstream answered with whitespace only.
    pub async fn summarize(&self, transcript: &str) -> Result<String, SummarizeError> {
        if transcript.trim().is_empty() {
            return Err(SummarizeError::MissingTranscript);
        }

        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(SummarizeError::MissingApiKey)?;

        let request = CompletionRequest::summary(&self.config.model, transcript);
        debug!(
            "Requesting summary from {} ({} transcript bytes)",
            request.model,
            transcript.len()
        );

        let reply = self.provider.complete(api_key, &request).await?;
        if !reply.status.is_success() {
            return Err(SummarizeError::Upstream {
                status: reply.status,
                body: reply.body,
            });
        }

        let completion: CompletionResponse =
            serde_json::from_str(&reply.body).context("Failed to parse DeepSeek response")?;

        completion
            .first_content()
            .filter(|content| !content.is_empty())
            .map(|content| content.trim().to_string())
            .ok_or(SummarizeError::EmptyCompletion)
    }
}
