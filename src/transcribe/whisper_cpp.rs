use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use tracing::info;

use super::Transcriber;
use crate::config::TranscriberConfig;
use crate::error::{Result, RepurposeError};
use crate::media::MediaProcessor;
use crate::transcript::{Transcript, WhisperCppOutput};

/// Whisper.cpp CLI implementation.
///
/// whisper-cli only accepts 16-bit PCM WAV input, so anything else is
/// transcoded first. All intermediates live in a temporary directory that
/// is removed on every exit path.
pub struct WhisperCppTranscriber {
    config: TranscriberConfig,
    media: Arc<dyn MediaProcessor>,
}

impl WhisperCppTranscriber {
    pub fn new(config: TranscriberConfig, media: Arc<dyn MediaProcessor>) -> Self {
        Self { config, media }
    }

    async fn prepare_audio(&self, input: &Path, temp_dir: &Path) -> Result<PathBuf> {
        let is_wav = input
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("wav"))
            .unwrap_or(false);

        if is_wav {
            return Ok(input.to_path_buf());
        }

        info!("Converting {} to 16 kHz mono WAV", input.display());
        let wav_path = temp_dir.join("input.wav");
        self.media.extract_audio(input, &wav_path).await?;
        Ok(wav_path)
    }
}

#[async_trait]
impl Transcriber for WhisperCppTranscriber {
    async fn transcribe(&self, input: &Path) -> Result<Transcript> {
        let model_path = Path::new(&self.config.model_path);
        if !model_path.exists() {
            return Err(RepurposeError::FileNotFound(format!(
                "whisper model: {}",
                self.config.model_path
            )));
        }

        let temp_dir = tempfile::tempdir()?;
        let audio_path = self.prepare_audio(input, temp_dir.path()).await?;

        // whisper-cli appends .json to the -of base path
        let output_base = temp_dir.path().join("whisper_output");

        let mut cmd = Command::new(&self.config.binary_path);
        cmd.arg("-m")
            .arg(&self.config.model_path)
            .arg("-f")
            .arg(&audio_path)
            .arg("-oj")
            .arg("-of")
            .arg(&output_base)
            .arg("-np")
            .arg("-l")
            .arg(&self.config.language);
        if self.config.no_gpu {
            cmd.arg("--no-gpu");
        }

        info!("Running transcription (this may take a few minutes)");
        let output = cmd.output().map_err(|e| {
            RepurposeError::Transcriber(format!(
                "Failed to execute {}: {}",
                self.config.binary_path, e
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RepurposeError::Transcriber(format!(
                "whisper-cli failed: {}",
                stderr
            )));
        }

        let json_path = output_base.with_extension("json");
        if !json_path.exists() {
            return Err(RepurposeError::Transcriber(format!(
                "whisper-cli produced no output file at {}; stderr: {}",
                json_path.display(),
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        let json_content = std::fs::read_to_string(&json_path)?;
        let whisper_output: WhisperCppOutput = serde_json::from_str(&json_content)
            .map_err(|e| {
                RepurposeError::Transcriber(format!("Failed to parse whisper-cli JSON: {}", e))
            })?;

        info!("Transcription complete");
        Ok(Transcript::from(whisper_output))
    }
}
