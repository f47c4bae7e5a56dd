// LLM provider abstraction
//
// One capability is needed from every backend: send a prompt (optionally
// with a separate system instruction), get completion text back. The
// provider is selected once at startup from configuration; credentials are
// resolved at construction so a missing key fails before any request.

pub mod anthropic;
pub mod ollama;
pub mod openai;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::LlmConfig;
use crate::error::{Result, RepurposeError};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a prompt and return the completion text.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Send a prompt with a separate system instruction.
    async fn complete_with_system(&self, system: &str, prompt: &str) -> Result<String>;
}

/// Create the provider named in configuration.
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>> {
    match config.provider.to_lowercase().as_str() {
        "openai" => {
            let api_key = require_api_key(config, "OPENAI_API_KEY")?;
            Ok(Arc::new(openai::OpenAiProvider::new(config, api_key)?))
        }
        "anthropic" => {
            let api_key = require_api_key(config, "ANTHROPIC_API_KEY")?;
            Ok(Arc::new(anthropic::AnthropicProvider::new(config, api_key)?))
        }
        "ollama" => Ok(Arc::new(ollama::OllamaProvider::new(config)?)),
        other => Err(RepurposeError::Config(format!(
            "Unknown LLM provider '{}'. Valid providers: openai, anthropic, ollama",
            other
        ))),
    }
}

fn require_api_key(config: &LlmConfig, default_env: &str) -> Result<String> {
    let env_var = config.api_key_env.as_deref().unwrap_or(default_env);
    std::env::var(env_var).map_err(|_| {
        RepurposeError::Config(format!(
            "API key not found in environment variable: {}",
            env_var
        ))
    })
}
