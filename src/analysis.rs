use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::error::{Result, RepurposeError};
use crate::llm::LlmProvider;
use crate::prompts::{PromptKind, PromptStore};
use crate::transcript::Transcript;

/// A span of the source recording in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    /// Duration in seconds. A range whose end does not exceed its start is
    /// rejected here so no video operation can produce a zero or
    /// negative-duration clip.
    pub fn duration(&self) -> Result<f64> {
        if self.end > self.start {
            Ok(self.end - self.start)
        } else {
            Err(RepurposeError::Media(format!(
                "Invalid time range: end {:.3}s must be greater than start {:.3}s",
                self.end, self.start
            )))
        }
    }
}

/// Highlights come back from the model either as a list or as free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Highlights {
    List(Vec<String>),
    Text(String),
}

/// Structured result of the analysis stage. Every field is optional; a
/// missing field means the corresponding output is skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Highlights>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_form: Option<Vec<TimeRange>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_form: Option<Vec<TimeRange>>,
}

impl Analysis {
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Runs the transcript through the LLM and parses the structured reply.
pub struct Analyzer {
    llm: Arc<dyn LlmProvider>,
    prompts: PromptStore,
}

impl Analyzer {
    pub fn new(llm: Arc<dyn LlmProvider>, prompts: PromptStore) -> Self {
        Self { llm, prompts }
    }

    pub async fn analyze(&self, transcript: &Transcript) -> Result<Analysis> {
        let listing = transcript.timestamped_listing();
        let template = self.prompts.load(PromptKind::Analysis)?;
        let prompt = template.replace("{transcript}", &listing);

        info!(
            "Submitting {} transcript segments for analysis",
            transcript.segments.len()
        );
        let reply = self.llm.complete(&prompt).await?;

        parse_analysis(&reply)
    }
}

/// Parse an LLM reply into an [`Analysis`].
///
/// The reply may be bare JSON or JSON wrapped in a fenced code block (with
/// or without a language tag); the first fenced block wins. A reply that
/// still fails to parse fails the analysis stage with the offending content
/// in the diagnostic.
pub fn parse_analysis(reply: &str) -> Result<Analysis> {
    let candidate = extract_json_block(reply);
    serde_json::from_str(candidate).map_err(|e| {
        RepurposeError::Analysis(format!(
            "Failed to parse LLM reply as analysis JSON: {}; reply was: {}",
            e, candidate
        ))
    })
}

/// Best-effort extraction: the body of the first fenced code block if one is
/// present and closed, else the raw trimmed reply.
fn extract_json_block(reply: &str) -> &str {
    if let Some(open) = reply.find("```") {
        let after = &reply[open + 3..];
        // The rest of the fence line is a language tag; the body starts on
        // the next line.
        let body_start = after.find('\n').map(|i| i + 1).unwrap_or(after.len());
        let body = &after[body_start..];
        if let Some(close) = body.find("```") {
            return body[..close].trim();
        }
    }
    reply.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BARE: &str = r#"{
        "title": "Building a parser live",
        "highlights": ["wrote the lexer", "fixed the off-by-one"],
        "long_form": [{"start": 12.0, "end": 340.5}],
        "short_form": [{"start": 100.0, "end": 145.0}, {"start": 800.0, "end": 850.0}]
    }"#;

    #[test]
    fn test_bare_and_fenced_replies_parse_identically() {
        let bare = parse_analysis(BARE).unwrap();
        let fenced_tagged = parse_analysis(&format!("```json\n{}\n```", BARE)).unwrap();
        let fenced_untagged = parse_analysis(&format!("```\n{}\n```", BARE)).unwrap();

        assert_eq!(bare, fenced_tagged);
        assert_eq!(bare, fenced_untagged);
        assert_eq!(bare.title.as_deref(), Some("Building a parser live"));
        assert_eq!(bare.short_form.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_fenced_reply_with_surrounding_prose() {
        let reply = format!("Here is the analysis you asked for:\n```json\n{}\n```\nLet me know!", BARE);
        assert_eq!(parse_analysis(&reply).unwrap(), parse_analysis(BARE).unwrap());
    }

    #[test]
    fn test_malformed_reply_fails_with_diagnostic() {
        let err = parse_analysis("I could not find anything interesting.").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Failed to parse LLM reply"));
        assert!(message.contains("could not find anything interesting"));
    }

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let analysis = parse_analysis(r#"{"title": "just a title"}"#).unwrap();
        assert!(analysis.highlights.is_none());
        assert!(analysis.long_form.is_none());
        assert!(analysis.short_form.is_none());
    }

    #[test]
    fn test_highlights_accept_list_or_text() {
        let list = parse_analysis(r#"{"highlights": ["a", "b"]}"#).unwrap();
        assert_eq!(
            list.highlights,
            Some(Highlights::List(vec!["a".to_string(), "b".to_string()]))
        );

        let text = parse_analysis(r#"{"highlights": "one big highlight"}"#).unwrap();
        assert_eq!(
            text.highlights,
            Some(Highlights::Text("one big highlight".to_string()))
        );
    }

    #[test]
    fn test_time_range_duration() {
        assert_eq!(TimeRange { start: 5.0, end: 10.5 }.duration().unwrap(), 5.5);
        assert!(TimeRange { start: 10.0, end: 10.0 }.duration().is_err());
        assert!(TimeRange { start: 10.0, end: 4.0 }.duration().is_err());
    }
}
