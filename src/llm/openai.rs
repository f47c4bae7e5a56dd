use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::LlmProvider;
use crate::config::LlmConfig;
use crate::error::{Result, RepurposeError};

const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI chat-completions backend.
pub struct OpenAiProvider {
    client: Client,
    model: String,
    api_key: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl OpenAiProvider {
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

    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!("Sending request to OpenAI API");

        let response = self
            .client
            .post(API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| RepurposeError::Llm(format!("OpenAI request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(RepurposeError::Llm(format!(
                "OpenAI API error {}: {}",
                status, text
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| RepurposeError::Llm(format!("Failed to parse OpenAI response: {}", e)))?;

        chat.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| RepurposeError::Llm("Empty response from OpenAI".to_string()))
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.chat(vec![ChatMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        }])
        .await
    }

    async fn complete_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.chat(vec![
            ChatMessage {
                role: "system".to_string(),
                content: system.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            },
        ])
        .await
    }
}
