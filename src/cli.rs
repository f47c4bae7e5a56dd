use clap::Parser;
use std::path::PathBuf;

/// Repurpose a stream recording into a trimmed long-form video, vertical
/// short clips, and a set of social-media text drafts.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Input recording (video or audio file)
    pub input: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip transcription when transcript.json already exists
    #[arg(long)]
    pub skip_transcription: bool,

    /// Skip video processing
    #[arg(long)]
    pub skip_video: bool,

    /// Skip text content generation
    #[arg(long)]
    pub skip_text: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
