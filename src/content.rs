use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::analysis::{Analysis, Highlights};
use crate::error::Result;
use crate::llm::LlmProvider;
use crate::prompts::{PromptKind, PromptStore};
use crate::transcript::Transcript;

/// One generated artifact: a prompt template paired with an output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentType {
    pub name: &'static str,
    pub prompt: PromptKind,
    pub output_file: &'static str,
}

/// The five content types, generated independently of each other.
pub const CONTENT_TYPES: [ContentType; 5] = [
    ContentType {
        name: "twitter_thread",
        prompt: PromptKind::TwitterThread,
        output_file: "twitter_thread.md",
    },
    ContentType {
        name: "reddit_post",
        prompt: PromptKind::RedditPost,
        output_file: "reddit_post.md",
    },
    ContentType {
        name: "medium_article",
        prompt: PromptKind::MediumArticle,
        output_file: "medium_article.md",
    },
    ContentType {
        name: "tweets",
        prompt: PromptKind::Tweets,
        output_file: "tweets.md",
    },
    ContentType {
        name: "telegram_post",
        prompt: PromptKind::TelegramPost,
        output_file: "telegram_post.md",
    },
];

/// Outcome of a generation run. Failed types are reported, not fatal.
#[derive(Debug, Default)]
pub struct ContentReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<ContentFailure>,
}

#[derive(Debug)]
pub struct ContentFailure {
    pub name: &'static str,
    pub error: String,
}

/// Generates the text artifacts from a transcript and its analysis.
pub struct ContentGenerator {
    llm: Arc<dyn LlmProvider>,
    prompts: PromptStore,
}

impl ContentGenerator {
    pub fn new(llm: Arc<dyn LlmProvider>, prompts: PromptStore) -> Self {
        Self { llm, prompts }
    }

    /// Generate all content types. A failing type is logged and recorded;
    /// the remaining types still run.
    pub async fn generate_all(
        &self,
        transcript: &Transcript,
        analysis: &Analysis,
        output_dir: &Path,
    ) -> Result<ContentReport> {
        let transcript_text = transcript.plain_text();
        let highlights = format_highlights(analysis.highlights.as_ref());
        let title = analysis.title.clone().unwrap_or_default();

        let mut report = ContentReport::default();

        for content in CONTENT_TYPES {
            info!("Generating {}", content.name);
            match self
                .generate(content, &transcript_text, &highlights, &title, output_dir)
                .await
            {
                Ok(path) => report.written.push(path),
                Err(e) => {
                    warn!("Content type {} failed: {}", content.name, e);
                    report.failed.push(ContentFailure {
                        name: content.name,
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    async fn generate(
        &self,
        content: ContentType,
        transcript_text: &str,
        highlights: &str,
        title: &str,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let template = self.prompts.load(content.prompt)?;
        let prompt = fill_template(&template, transcript_text, highlights, title);

        let reply = self.llm.complete(&prompt).await?;

        let path = output_dir.join(content.output_file);
        tokio::fs::write(&path, reply.trim()).await?;
        Ok(path)
    }
}

/// Substitute the template placeholders.
pub fn fill_template(template: &str, transcript: &str, highlights: &str, title: &str) -> String {
    template
        .replace("{transcript}", transcript)
        .replace("{highlights}", highlights)
        .replace("{title}", title)
}

/// Bullet a highlight list; pass free text through untouched.
pub fn format_highlights(highlights: Option<&Highlights>) -> String {
    match highlights {
        Some(Highlights::List(items)) => items
            .iter()
            .map(|item| format!("- {}", item))
            .collect::<Vec<_>>()
            .join("\n"),
        Some(Highlights::Text(text)) => text.clone(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlmProvider;
    use crate::transcript::TranscriptSegment;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use crate::error::RepurposeError;

    fn transcript() -> Transcript {
        Transcript {
            segments: vec![TranscriptSegment {
                start: 0.0,
                end: 5.0,
                text: "we shipped the release".to_string(),
            }],
        }
    }

    #[test]
    fn test_format_highlights_bullets_lists() {
        let highlights = Highlights::List(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(format_highlights(Some(&highlights)), "- first\n- second");
    }

    #[test]
    fn test_format_highlights_passes_text_through() {
        let highlights = Highlights::Text("one big thing".to_string());
        assert_eq!(format_highlights(Some(&highlights)), "one big thing");
        assert_eq!(format_highlights(None), "");
    }

    #[test]
    fn test_fill_template_substitutes_all_placeholders() {
        let filled = fill_template(
            "T: {title}\nH:\n{highlights}\nX:\n{transcript}",
            "line one",
            "- a",
            "My Stream",
        );
        assert_eq!(filled, "T: My Stream\nH:\n- a\nX:\nline one");
    }

    #[tokio::test]
    async fn test_generate_all_writes_one_file_per_type() {
        let mut llm = MockLlmProvider::new();
        llm.expect_complete()
            .times(5)
            .returning(|_| Ok("  generated text  ".to_string()));

        let dir = tempfile::tempdir().unwrap();
        let generator = ContentGenerator::new(Arc::new(llm), PromptStore::new("missing"));
        let report = generator
            .generate_all(&transcript(), &Analysis::default(), dir.path())
            .await
            .unwrap();

        assert_eq!(report.written.len(), 5);
        assert!(report.failed.is_empty());
        for content in CONTENT_TYPES {
            let path = dir.path().join(content.output_file);
            assert_eq!(std::fs::read_to_string(path).unwrap(), "generated text");
        }
    }

    #[tokio::test]
    async fn test_one_failing_type_does_not_block_the_others() {
        let calls = AtomicUsize::new(0);
        let mut llm = MockLlmProvider::new();
        llm.expect_complete().times(5).returning(move |_| {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(RepurposeError::Llm("model unavailable".to_string()))
            } else {
                Ok("fine".to_string())
            }
        });

        let dir = tempfile::tempdir().unwrap();
        let generator = ContentGenerator::new(Arc::new(llm), PromptStore::new("missing"));
        let report = generator
            .generate_all(&transcript(), &Analysis::default(), dir.path())
            .await
            .unwrap();

        assert_eq!(report.written.len(), 4);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].name, "twitter_thread");
        assert!(report.failed[0].error.contains("model unavailable"));
    }
}
