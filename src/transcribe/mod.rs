// Modular transcription architecture
//
// One implementation exists today (whisper.cpp via its CLI); the trait
// keeps the recognizer substitutable in tests and leaves room for hosted
// speech services later.

pub mod whisper_cpp;

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use crate::config::TranscriberConfig;
use crate::error::Result;
use crate::media::MediaProcessor;
use crate::transcript::Transcript;

/// Main trait for transcription operations
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe a media file into a timestamped transcript.
    async fn transcribe(&self, input: &Path) -> Result<Transcript>;
}

/// Factory for creating transcriber instances
pub struct TranscriberFactory;

impl TranscriberFactory {
    /// Create the default transcriber implementation (whisper.cpp CLI)
    pub fn create(
        config: TranscriberConfig,
        media: Arc<dyn MediaProcessor>,
    ) -> Box<dyn Transcriber> {
        Box::new(whisper_cpp::WhisperCppTranscriber::new(config, media))
    }
}
