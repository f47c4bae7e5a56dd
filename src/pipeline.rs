use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{info, warn};

use crate::analysis::Analyzer;
use crate::config::Config;
use crate::content::ContentGenerator;
use crate::error::{Result, RepurposeError};
use crate::llm::{self, LlmProvider};
use crate::media::{MediaProcessor, MediaProcessorFactory, VideoAssembler};
use crate::prompts::PromptStore;
use crate::transcribe::{Transcriber, TranscriberFactory};
use crate::transcript::Transcript;

/// Which stages to skip for this run.
#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    pub skip_transcription: bool,
    pub skip_video: bool,
    pub skip_text: bool,
}

/// The four-stage repurposing pipeline, run strictly in sequence:
/// transcribe, analyze, assemble video, generate text.
pub struct Pipeline {
    config: Config,
    transcriber: Box<dyn Transcriber>,
    media: Arc<dyn MediaProcessor>,
    llm: Arc<dyn LlmProvider>,
}

impl Pipeline {
    /// Wire up all collaborators. Configuration problems (unknown provider,
    /// missing credential, bad aspect ratio, unavailable ffmpeg) surface
    /// here, before any stage runs.
    pub fn new(config: Config) -> Result<Self> {
        let llm = llm::create_provider(&config.llm)?;
        let media = MediaProcessorFactory::create(config.video.clone())?;

        media.check_availability()?;

        let transcriber = TranscriberFactory::create(config.transcriber.clone(), media.clone());

        Ok(Self {
            config,
            transcriber,
            media,
            llm,
        })
    }

    pub async fn run(&self, input: &Path, options: &RunOptions) -> Result<()> {
        if !input.exists() {
            return Err(RepurposeError::FileNotFound(input.display().to_string()));
        }

        let stem = input
            .file_stem()
            .ok_or_else(|| RepurposeError::Config("Invalid input filename".to_string()))?
            .to_string_lossy()
            .to_string();

        let output_dir = PathBuf::from(&self.config.output.base_dir).join(&stem);
        fs::create_dir_all(output_dir.join("videos").join("shorts")).await?;

        info!("Input:  {}", input.display());
        info!("Output: {}", output_dir.display());

        let prompts = PromptStore::new(&self.config.output.prompts_dir);

        // Stage 1: transcription
        let transcript_path = output_dir.join("transcript.json");
        let transcript = if options.skip_transcription && transcript_path.exists() {
            info!("[1/4] Skipping transcription (using existing transcript.json)");
            Transcript::load(&transcript_path)?
        } else {
            info!("[1/4] Transcribing audio");
            let transcript = self.transcriber.transcribe(input).await?;
            transcript.save(&transcript_path)?;
            info!("Transcript saved: {}", transcript_path.display());
            transcript
        };

        // Stage 2: LLM analysis
        info!("[2/4] Analyzing transcript");
        let analyzer = Analyzer::new(self.llm.clone(), prompts.clone());
        let analysis = analyzer.analyze(&transcript).await?;
        let analysis_path = output_dir.join("analysis.json");
        analysis.save(&analysis_path)?;
        info!("Analysis saved: {}", analysis_path.display());

        // Stage 3: video assembly
        if options.skip_video {
            info!("[3/4] Skipping video processing");
        } else {
            info!("[3/4] Processing video segments");
            let assembler =
                VideoAssembler::new(self.media.as_ref(), self.config.video.short_form.clone());
            let report = assembler
                .assemble(input, &analysis, &output_dir.join("videos"))
                .await?;

            if let Some(path) = &report.long_form {
                info!("Long-form video saved: {}", path.display());
            }
            info!("Short clips produced: {}", report.shorts.len());
            for failure in &report.failed_shorts {
                warn!(
                    "Short clip {} was not produced: {}",
                    failure.number, failure.error
                );
            }
        }

        // Stage 4: text content generation
        if options.skip_text {
            info!("[4/4] Skipping text content generation");
        } else {
            info!("[4/4] Generating text content");
            let generator = ContentGenerator::new(self.llm.clone(), prompts);
            let report = generator
                .generate_all(&transcript, &analysis, &output_dir)
                .await?;

            info!("Text artifacts written: {}", report.written.len());
            for failure in &report.failed {
                warn!(
                    "Content type {} was not generated: {}",
                    failure.name, failure.error
                );
            }
        }

        info!("Pipeline complete, outputs in {}", output_dir.display());
        Ok(())
    }
}
