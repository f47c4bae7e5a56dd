use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::LlmProvider;
use crate::config::LlmConfig;
use crate::error::{Result, RepurposeError};

/// Locally hosted ollama backend, reached over its `/api/generate` endpoint.
pub struct OllamaProvider {
    client: Client,
    endpoint: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    async fn generate(&self, system: Option<&str>, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            system: system.map(str::to_string),
            stream: false,
        };

        let url = format!("{}/api/generate", self.endpoint);
        debug!("Sending generation request to {}", url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                RepurposeError::Llm(format!(
                    "Failed to connect to ollama at {}: {}",
                    self.endpoint, e
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(RepurposeError::Llm(format!(
                "Ollama API error {}: {}",
                status, text
            )));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| RepurposeError::Llm(format!("Failed to parse ollama response: {}", e)))?;

        Ok(generated.response)
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.generate(None, prompt).await
    }

    async fn complete_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.generate(Some(system), prompt).await
    }
}
