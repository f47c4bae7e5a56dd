use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::error::{Result, RepurposeError};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub transcriber: TranscriberConfig,
    pub llm: LlmConfig,
    pub video: VideoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Base directory for per-recording output directories
    pub base_dir: String,
    /// Directory holding prompt template overrides
    pub prompts_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriberConfig {
    /// Path to the whisper-cli binary
    pub binary_path: String,
    /// Path to the Whisper GGML model file
    pub model_path: String,
    /// Source language passed to the recognizer
    pub language: String,
    /// Disable GPU inference (some backends fail to allocate buffers)
    pub no_gpu: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name: openai, anthropic, or ollama
    pub provider: String,
    /// Model to use for analysis and content generation
    pub model: String,
    /// Environment variable holding the API key; defaults per provider
    pub api_key_env: Option<String>,
    /// Endpoint URL for the local ollama server
    pub endpoint: String,
    /// Maximum completion tokens
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// HTTP timeout for completion requests
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Path to ffmpeg binary
    pub binary_path: String,
    /// Short-form clip tuning
    pub short_form: ShortFormConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortFormConfig {
    /// Expected minimum clip duration in seconds
    pub min_duration: f64,
    /// Expected maximum clip duration in seconds
    pub max_duration: f64,
    /// Output aspect ratio as "W:H"
    pub aspect_ratio: String,
    /// Output width after scaling
    pub target_width: u32,
    /// Output height after scaling
    pub target_height: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_dir: "output".to_string(),
            prompts_dir: "prompts".to_string(),
        }
    }
}

impl Default for TranscriberConfig {
    fn default() -> Self {
        Self {
            binary_path: "whisper-cli".to_string(),
            model_path: "models/ggml-base.en.bin".to_string(),
            language: "en".to_string(),
            no_gpu: true,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o".to_string(),
            api_key_env: None,
            endpoint: "http://localhost:11434".to_string(),
            max_tokens: 4096,
            temperature: 0.7,
            timeout_seconds: 300,
        }
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            binary_path: "ffmpeg".to_string(),
            short_form: ShortFormConfig::default(),
        }
    }
}

impl Default for ShortFormConfig {
    fn default() -> Self {
        Self {
            min_duration: 30.0,
            max_duration: 60.0,
            aspect_ratio: "9:16".to_string(),
            target_width: 1080,
            target_height: 1920,
        }
    }
}

impl ShortFormConfig {
    /// Parse the configured aspect ratio into width and height parts.
    pub fn aspect(&self) -> Result<(u32, u32)> {
        let mut parts = self.aspect_ratio.splitn(2, ':');
        let parse = |s: Option<&str>| {
            s.and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|v| *v > 0)
        };
        match (parse(parts.next()), parse(parts.next())) {
            (Some(w), Some(h)) => Ok((w, h)),
            _ => Err(RepurposeError::Config(format!(
                "Invalid aspect ratio '{}', expected W:H (e.g. 9:16)",
                self.aspect_ratio
            ))),
        }
    }

    /// Build the ffmpeg filter that center-crops to the configured aspect
    /// ratio (computed from source height) and scales to the target size.
    pub fn crop_filter(&self) -> Result<String> {
        let (w, h) = self.aspect()?;
        Ok(format!(
            "crop=ih*{}/{}:ih,scale={}:{}",
            w, h, self.target_width, self.target_height
        ))
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RepurposeError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| RepurposeError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| RepurposeError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| RepurposeError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.video.binary_path, "ffmpeg");
        assert_eq!(config.video.short_form.aspect_ratio, "9:16");
        assert_eq!(config.output.base_dir, "output");
    }

    #[test]
    fn test_partial_config_parses_with_defaults() {
        let config: Config = toml::from_str(
            r#"
            [llm]
            provider = "ollama"
            model = "llama3"

            [video.short_form]
            aspect_ratio = "4:5"
            "#,
        )
        .unwrap();

        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.llm.endpoint, "http://localhost:11434");
        assert_eq!(config.video.short_form.aspect_ratio, "4:5");
        assert_eq!(config.video.short_form.target_width, 1080);
        assert_eq!(config.transcriber.language, "en");
    }

    #[test]
    fn test_crop_filter_from_aspect() {
        let short_form = ShortFormConfig::default();
        assert_eq!(
            short_form.crop_filter().unwrap(),
            "crop=ih*9/16:ih,scale=1080:1920"
        );
    }

    #[test]
    fn test_invalid_aspect_ratio() {
        let short_form = ShortFormConfig {
            aspect_ratio: "vertical".to_string(),
            ..ShortFormConfig::default()
        };
        assert!(short_form.aspect().is_err());

        let zero = ShortFormConfig {
            aspect_ratio: "0:16".to_string(),
            ..ShortFormConfig::default()
        };
        assert!(zero.aspect().is_err());
    }
}
