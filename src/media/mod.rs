// Modular media processing architecture
//
// This module provides a clean abstraction over media processing operations:
// - Commands: ffmpeg command builders
// - Processor: the ffmpeg-backed implementation
// - Assembly: turning analysis time ranges into playable files

pub mod assembly;
pub mod commands;
pub mod processor;

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

pub use assembly::*;
pub use commands::*;
pub use processor::*;

use crate::config::VideoConfig;
use crate::error::Result;

/// Media operations needed by the pipeline, behind a trait so tests can
/// substitute the external transcoder.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaProcessor: Send + Sync {
    /// Re-encode a cut of `input` starting at `start` seconds, `duration`
    /// seconds long.
    async fn trim(&self, input: &Path, start: f64, duration: f64, output: &Path) -> Result<()>;

    /// Cut a segment and convert it to vertical orientation (center crop to
    /// the configured aspect ratio, then scale).
    async fn vertical_clip(
        &self,
        input: &Path,
        start: f64,
        duration: f64,
        output: &Path,
    ) -> Result<()>;

    /// Losslessly concatenate the files listed in an ffmpeg concat manifest.
    async fn concatenate(&self, manifest: &Path, output: &Path) -> Result<()>;

    /// Extract mono 16 kHz 16-bit PCM audio, the only input the speech
    /// recognizer accepts.
    async fn extract_audio(&self, input: &Path, output: &Path) -> Result<()>;

    /// Check that the transcoder binary is runnable.
    fn check_availability(&self) -> Result<()>;
}

/// Factory for creating media processor instances
pub struct MediaProcessorFactory;

impl MediaProcessorFactory {
    /// Create the default media processor implementation (ffmpeg-based)
    pub fn create(config: VideoConfig) -> Result<Arc<dyn MediaProcessor>> {
        Ok(Arc::new(processor::FfmpegProcessor::new(config)?))
    }
}
