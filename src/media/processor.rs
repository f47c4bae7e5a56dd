use async_trait::async_trait;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

use super::{MediaCommandBuilder, MediaProcessor};
use crate::config::VideoConfig;
use crate::error::{Result, RepurposeError};

/// Concrete implementation of the media processor (ffmpeg-based)
pub struct FfmpegProcessor {
    config: VideoConfig,
    command_builder: MediaCommandBuilder,
    crop_filter: String,
}

impl FfmpegProcessor {
    /// Create a new ffmpeg processor. Fails when the configured aspect
    /// ratio cannot be parsed, so a bad value surfaces at startup.
    pub fn new(config: VideoConfig) -> Result<Self> {
        let command_builder = MediaCommandBuilder::new(&config.binary_path);
        let crop_filter = config.short_form.crop_filter()?;

        Ok(Self {
            config,
            command_builder,
            crop_filter,
        })
    }
}

#[async_trait]
impl MediaProcessor for FfmpegProcessor {
    async fn trim(&self, input: &Path, start: f64, duration: f64, output: &Path) -> Result<()> {
        debug!(
            "Trimming {} [{:.3}s +{:.3}s] -> {}",
            input.display(),
            start,
            duration,
            output.display()
        );

        self.command_builder
            .trim_segment(input, start, duration, output)
            .execute()
            .await
    }

    async fn vertical_clip(
        &self,
        input: &Path,
        start: f64,
        duration: f64,
        output: &Path,
    ) -> Result<()> {
        debug!(
            "Cutting vertical clip {} [{:.3}s +{:.3}s] -> {}",
            input.display(),
            start,
            duration,
            output.display()
        );

        self.command_builder
            .vertical_clip(input, start, duration, &self.crop_filter, output)
            .execute()
            .await
    }

    async fn concatenate(&self, manifest: &Path, output: &Path) -> Result<()> {
        info!("Concatenating segments into {}", output.display());

        self.command_builder
            .concat_segments(manifest, output)
            .execute()
            .await
    }

    async fn extract_audio(&self, input: &Path, output: &Path) -> Result<()> {
        info!(
            "Extracting audio from {} to {}",
            input.display(),
            output.display()
        );

        self.command_builder
            .extract_audio(input, output)
            .execute()
            .await
    }

    fn check_availability(&self) -> Result<()> {
        let output = Command::new(&self.config.binary_path)
            .arg("-version")
            .output()
            .map_err(|e| RepurposeError::Media(format!("Media processor not found: {}", e)))?;

        if output.status.success() {
            info!("Media processor is available");
            Ok(())
        } else {
            Err(RepurposeError::Media(
                "Media processor version check failed".to_string(),
            ))
        }
    }
}
