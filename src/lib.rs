//! Repurpose - Stream Recording Repurposing Pipeline
//!
//! Turns a recorded stream into a timestamped transcript, a trimmed
//! long-form video, vertical short clips, and a set of social-media text
//! drafts, orchestrating whisper-cpp, ffmpeg, and an LLM provider.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod llm;
pub mod media;
pub mod pipeline;
pub mod prompts;
pub mod transcribe;
pub mod transcript;
