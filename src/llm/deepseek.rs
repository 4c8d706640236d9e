use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use crate::config::Settings;
use crate::llm::client::{CompletionRequest, LlmProvider, ProviderReply};

const DEFAULT_DEEPSEEK_ENDPOINT: &str = "https://api.deepseek.com/v1";

pub struct DeepSeekClient {
    http: Client,
    endpoint: String,
}

impl DeepSeekClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let endpoint = if settings.llm.endpoint.trim().is_empty() {
            DEFAULT_DEEPSEEK_ENDPOINT.to_string()
        } else {
            settings
                .llm
                .endpoint
                .trim()
                .trim_end_matches('/')
                .to_string()
        };

        let mut builder = Client::builder();
        if settings.llm.timeout_secs > 0 {
            builder = builder.timeout(std::time::Duration::from_secs(settings.llm.timeout_secs));
        }

        Ok(Self {
            http: builder
                .build()
                .context("Failed to build DeepSeek HTTP client")?,
            endpoint,
        })
    }

    fn request_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }
}

#[async_trait]
impl LlmProvider for DeepSeekClient {
    async fn complete(&self, api_key: &str, request: &CompletionRequest) -> Result<ProviderReply> {
        let response = self
            .http
            .post(self.request_url())
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .context("DeepSeek request failed")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read DeepSeek response body")?;

        Ok(ProviderReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url_strips_trailing_slash() {
        let mut settings = Settings::default();
        settings.llm.endpoint = "http://localhost:9000/v1/".to_string();

        let client = DeepSeekClient::from_settings(&settings).unwrap();
        assert_eq!(client.request_url(), "http://localhost:9000/v1/chat/completions");
    }

    #[test]
    fn blank_endpoint_falls_back_to_default() {
        let mut settings = Settings::default();
        settings.llm.endpoint = "  ".to_string();

        let client = DeepSeekClient::from_settings(&settings).unwrap();
        assert_eq!(
            client.request_url(),
            "https://api.deepseek.com/v1/chat/completions"
        );
    }
}
