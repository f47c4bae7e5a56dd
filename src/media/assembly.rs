use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::MediaProcessor;
use crate::analysis::{Analysis, TimeRange};
use crate::config::ShortFormConfig;
use crate::error::Result;

/// Outcome of one assembly run. Short clips that failed are reported here
/// instead of failing the run, so one bad timestamp cannot discard the
/// whole batch.
#[derive(Debug, Default)]
pub struct AssemblyReport {
    pub long_form: Option<PathBuf>,
    pub shorts: Vec<PathBuf>,
    pub failed_shorts: Vec<ShortClipFailure>,
}

#[derive(Debug)]
pub struct ShortClipFailure {
    /// 1-based clip number, matching the output file numbering
    pub number: usize,
    pub error: String,
}

/// Turns analysis time ranges into playable files.
pub struct VideoAssembler<'a> {
    processor: &'a dyn MediaProcessor,
    short_form: ShortFormConfig,
}

impl<'a> VideoAssembler<'a> {
    pub fn new(processor: &'a dyn MediaProcessor, short_form: ShortFormConfig) -> Self {
        Self {
            processor,
            short_form,
        }
    }

    /// Produce every video output the analysis calls for under `videos_dir`.
    pub async fn assemble(
        &self,
        input: &Path,
        analysis: &Analysis,
        videos_dir: &Path,
    ) -> Result<AssemblyReport> {
        tokio::fs::create_dir_all(videos_dir).await?;

        let mut report = AssemblyReport::default();

        if let Some(ranges) = &analysis.long_form {
            report.long_form = self
                .assemble_long_form(input, ranges, &videos_dir.join("long_form.mp4"))
                .await?;
        }

        if let Some(clips) = &analysis.short_form {
            self.assemble_shorts(input, clips, &videos_dir.join("shorts"), &mut report)
                .await?;
        }

        Ok(report)
    }

    /// Long form: a single range is one trim; several ranges are cut in
    /// listed order and stream-copy concatenated. The listed order is
    /// authoritative and never re-sorted, even for overlapping or
    /// out-of-order ranges.
    async fn assemble_long_form(
        &self,
        input: &Path,
        ranges: &[TimeRange],
        output: &Path,
    ) -> Result<Option<PathBuf>> {
        match ranges {
            [] => {
                info!("Analysis lists no long-form ranges, skipping long-form video");
                Ok(None)
            }
            [only] => {
                info!("Creating long-form video from a single range");
                self.processor
                    .trim(input, only.start, only.duration()?, output)
                    .await?;
                Ok(Some(output.to_path_buf()))
            }
            many => {
                info!("Creating long-form video from {} ranges", many.len());
                let temp_dir = tempfile::tempdir()?;

                let mut parts = Vec::with_capacity(many.len());
                for (idx, range) in many.iter().enumerate() {
                    let part = temp_dir.path().join(format!("segment_{:03}.mp4", idx));
                    self.processor
                        .trim(input, range.start, range.duration()?, &part)
                        .await?;
                    parts.push(part);
                }

                let manifest = temp_dir.path().join("concat.txt");
                std::fs::write(&manifest, concat_manifest(&parts))?;

                self.processor.concatenate(&manifest, output).await?;
                Ok(Some(output.to_path_buf()))
            }
        }
    }

    /// Shorts are numbered from 1 in input order. A failing clip is logged
    /// and recorded; the rest of the batch still runs.
    async fn assemble_shorts(
        &self,
        input: &Path,
        clips: &[TimeRange],
        shorts_dir: &Path,
        report: &mut AssemblyReport,
    ) -> Result<()> {
        if clips.is_empty() {
            return Ok(());
        }

        info!("Creating {} short-form clips", clips.len());
        tokio::fs::create_dir_all(shorts_dir).await?;

        let bar = ProgressBar::new(clips.len() as u64);
        for (idx, clip) in clips.iter().enumerate() {
            let number = idx + 1;
            let output = shorts_dir.join(format!("short_{:02}.mp4", number));

            match self.cut_short(input, clip, &output).await {
                Ok(()) => report.shorts.push(output),
                Err(e) => {
                    warn!("Short clip {} failed: {}", number, e);
                    report.failed_shorts.push(ShortClipFailure {
                        number,
                        error: e.to_string(),
                    });
                }
            }
            bar.inc(1);
        }
        bar.finish_and_clear();

        Ok(())
    }

    async fn cut_short(&self, input: &Path, clip: &TimeRange, output: &Path) -> Result<()> {
        let duration = clip.duration()?;

        if duration < self.short_form.min_duration || duration > self.short_form.max_duration {
            warn!(
                "Short clip duration {:.1}s is outside the configured {:.0}-{:.0}s bounds",
                duration, self.short_form.min_duration, self.short_form.max_duration
            );
        }

        self.processor
            .vertical_clip(input, clip.start, duration, output)
            .await
    }
}

/// ffmpeg concat demuxer manifest: one `file` directive per part, in order.
pub fn concat_manifest(parts: &[PathBuf]) -> String {
    parts
        .iter()
        .map(|part| format!("file '{}'\n", part.display()))
        .collect()
}
