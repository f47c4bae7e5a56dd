//! Prompt template loading.
//!
//! Templates ship embedded in the binary; a copy in the configured prompts
//! directory overrides the embedded one, so operators can tune wording
//! without rebuilding.

use std::path::PathBuf;
use crate::error::{Result, RepurposeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Analysis,
    TwitterThread,
    RedditPost,
    MediumArticle,
    Tweets,
    TelegramPost,
}

impl PromptKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Analysis => "analysis.txt",
            Self::TwitterThread => "twitter_thread.txt",
            Self::RedditPost => "reddit_post.txt",
            Self::MediumArticle => "medium_article.txt",
            Self::Tweets => "tweets.txt",
            Self::TelegramPost => "telegram_post.txt",
        }
    }

    fn builtin(&self) -> &'static str {
        match self {
            Self::Analysis => include_str!("../prompts/analysis.txt"),
            Self::TwitterThread => include_str!("../prompts/twitter_thread.txt"),
            Self::RedditPost => include_str!("../prompts/reddit_post.txt"),
            Self::MediumArticle => include_str!("../prompts/medium_article.txt"),
            Self::Tweets => include_str!("../prompts/tweets.txt"),
            Self::TelegramPost => include_str!("../prompts/telegram_post.txt"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PromptStore {
    dir: PathBuf,
}

impl PromptStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Load a template, preferring an on-disk override.
    pub fn load(&self, kind: PromptKind) -> Result<String> {
        let path = self.dir.join(kind.file_name());
        if path.exists() {
            std::fs::read_to_string(&path).map_err(|e| {
                RepurposeError::Config(format!(
                    "Failed to read prompt template {}: {}",
                    path.display(),
                    e
                ))
            })
        } else {
            Ok(kind.builtin().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates_carry_placeholders() {
        let store = PromptStore::new("does-not-exist");
        let analysis = store.load(PromptKind::Analysis).unwrap();
        assert!(analysis.contains("{transcript}"));

        for kind in [
            PromptKind::TwitterThread,
            PromptKind::RedditPost,
            PromptKind::MediumArticle,
            PromptKind::Tweets,
            PromptKind::TelegramPost,
        ] {
            let template = store.load(kind).unwrap();
            assert!(template.contains("{transcript}"), "{}", kind.file_name());
            assert!(template.contains("{highlights}"), "{}", kind.file_name());
        }
    }

    #[test]
    fn test_on_disk_template_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tweets.txt"), "custom {transcript}").unwrap();

        let store = PromptStore::new(dir.path());
        assert_eq!(store.load(PromptKind::Tweets).unwrap(), "custom {transcript}");
        // Other templates still come from the embedded set
        assert!(store.load(PromptKind::Analysis).unwrap().contains("{transcript}"));
    }
}
