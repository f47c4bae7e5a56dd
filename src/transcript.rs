use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::error::Result;

// Structs for parsing whisper.cpp JSON output (`-oj`)
#[derive(Debug, Clone, Deserialize)]
pub struct WhisperCppOutput {
    pub transcription: Vec<WhisperCppSegment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhisperCppSegment {
    pub offsets: WhisperCppOffsets,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhisperCppOffsets {
    pub from: i64,
    pub to: i64,
}

/// One transcript segment. Times are seconds from the start of the recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Timestamped transcript of a recording. Produced once per input and then
/// consumed read-only by both analysis and content generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub segments: Vec<TranscriptSegment>,
}

impl From<WhisperCppOutput> for Transcript {
    fn from(output: WhisperCppOutput) -> Self {
        let segments = output
            .transcription
            .into_iter()
            .map(|seg| TranscriptSegment {
                // whisper.cpp reports offsets in milliseconds
                start: seg.offsets.from as f64 / 1000.0,
                end: seg.offsets.to as f64 / 1000.0,
                text: seg.text.trim().to_string(),
            })
            .collect();

        Transcript { segments }
    }
}

impl Transcript {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Render the transcript as one `[HH:MM:SS - HH:MM:SS] text` line per
    /// segment, the form the analysis prompt embeds.
    pub fn timestamped_listing(&self) -> String {
        self.segments
            .iter()
            .map(|seg| {
                format!(
                    "[{} - {}] {}",
                    format_time(seg.start),
                    format_time(seg.end),
                    seg.text
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The segment texts joined with newlines, without timestamps.
    pub fn plain_text(&self) -> String {
        self.segments
            .iter()
            .map(|seg| seg.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Format seconds as zero-padded HH:MM:SS.
fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transcript {
        Transcript {
            segments: vec![
                TranscriptSegment {
                    start: 0.0,
                    end: 4.5,
                    text: "welcome back everyone".to_string(),
                },
                TranscriptSegment {
                    start: 4.5,
                    end: 3661.2,
                    text: "let's get started".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00:00");
        assert_eq!(format_time(59.9), "00:00:59");
        assert_eq!(format_time(65.0), "00:01:05");
        assert_eq!(format_time(3661.0), "01:01:01");
    }

    #[test]
    fn test_listing_has_one_line_per_segment() {
        let listing = sample().timestamped_listing();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "[00:00:00 - 00:00:04] welcome back everyone");
        assert_eq!(lines[1], "[00:00:04 - 01:01:01] let's get started");
    }

    #[test]
    fn test_plain_text_drops_timestamps() {
        assert_eq!(
            sample().plain_text(),
            "welcome back everyone\nlet's get started"
        );
    }

    #[test]
    fn test_from_whisper_output_converts_milliseconds() {
        let raw = r#"{
            "transcription": [
                {
                    "timestamps": {"from": "00:00:00,000", "to": "00:00:02,500"},
                    "offsets": {"from": 0, "to": 2500},
                    "text": "  hello there "
                },
                {
                    "timestamps": {"from": "00:00:02,500", "to": "00:00:05,000"},
                    "offsets": {"from": 2500, "to": 5000},
                    "text": "second segment"
                }
            ]
        }"#;
        let output: WhisperCppOutput = serde_json::from_str(raw).unwrap();
        let transcript = Transcript::from(output);

        assert_eq!(transcript.segments.len(), 2);
        assert_eq!(transcript.segments[0].start, 0.0);
        assert_eq!(transcript.segments[0].end, 2.5);
        assert_eq!(transcript.segments[0].text, "hello there");
        assert_eq!(transcript.segments[1].start, 2.5);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.json");
        let transcript = sample();
        transcript.save(&path).unwrap();
        assert_eq!(Transcript::load(&path).unwrap(), transcript);
    }
}
