use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::LlmProvider;
use crate::config::LlmConfig;
use crate::error::{Result, RepurposeError};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Anthropic messages-API backend.
pub struct AnthropicProvider {
    client: Client,
    model: String,
    api_key: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

impl AnthropicProvider {
    pub fn new(config: &LlmConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            model: config.model.clone(),
            api_key,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    async fn send(&self, system: Option<&str>, prompt: &str) -> Result<String> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system: system.map(str::to_string),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        debug!("Sending request to Anthropic API");

        let response = self
            .client
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| RepurposeError::Llm(format!("Anthropic request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(RepurposeError::Llm(format!(
                "Anthropic API error {}: {}",
                status, text
            )));
        }

        let messages: MessagesResponse = response.json().await.map_err(|e| {
            RepurposeError::Llm(format!("Failed to parse Anthropic response: {}", e))
        })?;

        messages
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| RepurposeError::Llm("Empty response from Anthropic".to_string()))
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.send(None, prompt).await
    }

    async fn complete_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.send(Some(system), prompt).await
    }
}
