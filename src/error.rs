use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepurposeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transcription error: {0}")]
    Transcriber(String),

    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Media processing error: {0}")]
    Media(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

pub type Result<T> = std::result::Result<T, RepurposeError>;
