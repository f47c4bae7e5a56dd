use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::error::{Result, RepurposeError};

/// Abstract media processing command representation
#[derive(Debug, Clone)]
pub struct MediaCommand {
    pub binary_path: String,
    pub args: Vec<String>,
    pub description: String,
}

impl MediaCommand {
    /// Create a new media processing command
    pub fn new<S1: Into<String>, S2: Into<String>>(binary_path: S1, description: S2) -> Self {
        Self {
            binary_path: binary_path.into(),
            args: Vec::new(),
            description: description.into(),
        }
    }

    /// Add an argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add input file
    pub fn input<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg("-i").arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Add output file
    pub fn output<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Force overwrite output
    pub fn overwrite(self) -> Self {
        self.arg("-y")
    }

    /// Seek to a position in seconds
    pub fn seek(self, seconds: f64) -> Self {
        self.arg("-ss").arg(seconds.to_string())
    }

    /// Limit output duration in seconds
    pub fn limit_duration(self, seconds: f64) -> Self {
        self.arg("-t").arg(seconds.to_string())
    }

    /// Set video codec
    pub fn video_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-c:v").arg(codec)
    }

    /// Set audio codec
    pub fn audio_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-c:a").arg(codec)
    }

    /// Set encoder preset
    pub fn preset<S: Into<String>>(self, preset: S) -> Self {
        self.arg("-preset").arg(preset)
    }

    /// Disable video
    pub fn no_video(self) -> Self {
        self.arg("-vn")
    }

    /// Set audio sample rate
    pub fn audio_sample_rate(self, rate: u32) -> Self {
        self.arg("-ar").arg(rate.to_string())
    }

    /// Set audio channels
    pub fn audio_channels(self, channels: u32) -> Self {
        self.arg("-ac").arg(channels.to_string())
    }

    /// Add video filter
    pub fn video_filter<S: Into<String>>(self, filter: S) -> Self {
        self.arg("-vf").arg(filter)
    }

    /// Execute the command
    pub async fn execute(&self) -> Result<()> {
        debug!(
            "Executing media processing command: {} {:?}",
            self.binary_path, self.args
        );

        let mut cmd = Command::new(&self.binary_path);
        cmd.args(&self.args);

        let output = cmd
            .output()
            .map_err(|e| RepurposeError::Media(format!("Failed to execute media processor: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RepurposeError::Media(format!(
                "{} failed: {}",
                self.description, stderr
            )));
        }

        Ok(())
    }
}

/// Builder for the pipeline's ffmpeg operations
pub struct MediaCommandBuilder {
    binary_path: String,
}

impl MediaCommandBuilder {
    /// Create a new command builder
    pub fn new<S: Into<String>>(binary_path: S) -> Self {
        Self {
            binary_path: binary_path.into(),
        }
    }

    /// Re-encoding trim. Seeking before the input is faster and precise
    /// enough when the cut is re-encoded anyway.
    pub fn trim_segment<P: AsRef<Path>>(
        &self,
        input: P,
        start: f64,
        duration: f64,
        output: P,
    ) -> MediaCommand {
        MediaCommand::new(
            &self.binary_path,
            format!("Trim ({:.3}s from {:.3}s)", duration, start),
        )
        .overwrite()
        .seek(start)
        .input(input)
        .limit_duration(duration)
        .video_codec("libx264")
        .audio_codec("aac")
        .preset("fast")
        .output(output)
    }

    /// Vertical short clip: accurate seek after the input, then center crop
    /// and scale.
    pub fn vertical_clip<P: AsRef<Path>>(
        &self,
        input: P,
        start: f64,
        duration: f64,
        crop_filter: &str,
        output: P,
    ) -> MediaCommand {
        MediaCommand::new(
            &self.binary_path,
            format!("Vertical clip ({:.3}s from {:.3}s)", duration, start),
        )
        .overwrite()
        .input(input)
        .seek(start)
        .limit_duration(duration)
        .video_filter(crop_filter)
        .video_codec("libx264")
        .audio_codec("aac")
        .preset("fast")
        .output(output)
    }

    /// Stream-copy concatenation driven by a concat demuxer manifest.
    pub fn concat_segments<P: AsRef<Path>>(&self, manifest: P, output: P) -> MediaCommand {
        MediaCommand::new(&self.binary_path, "Segment concatenation")
            .overwrite()
            .arg("-f")
            .arg("concat")
            .arg("-safe")
            .arg("0")
            .input(manifest)
            .arg("-c")
            .arg("copy")
            .output(output)
    }

    /// Audio extraction in the recognizer's required format.
    pub fn extract_audio<P: AsRef<Path>>(&self, input: P, output: P) -> MediaCommand {
        MediaCommand::new(&self.binary_path, "Audio extraction")
            .input(input)
            .no_video()
            .audio_codec("pcm_s16le")
            .audio_sample_rate(16000)
            .audio_channels(1)
            .overwrite()
            .output(output)
    }

    /// Build version check command
    pub fn version_check(&self) -> MediaCommand {
        MediaCommand::new(&self.binary_path, "Version check").arg("-version")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> MediaCommandBuilder {
        MediaCommandBuilder::new("ffmpeg")
    }

    #[test]
    fn test_trim_command_seeks_before_input() {
        let cmd = builder().trim_segment("in.mp4", 12.5, 30.0, "out.mp4");
        assert_eq!(
            cmd.args,
            vec![
                "-y", "-ss", "12.5", "-i", "in.mp4", "-t", "30", "-c:v", "libx264", "-c:a",
                "aac", "-preset", "fast", "out.mp4"
            ]
        );
    }

    #[test]
    fn test_vertical_clip_command_applies_filter() {
        let cmd = builder().vertical_clip(
            "in.mp4",
            100.0,
            45.0,
            "crop=ih*9/16:ih,scale=1080:1920",
            "short_01.mp4",
        );
        assert_eq!(
            cmd.args,
            vec![
                "-y", "-i", "in.mp4", "-ss", "100", "-t", "45", "-vf",
                "crop=ih*9/16:ih,scale=1080:1920", "-c:v", "libx264", "-c:a", "aac", "-preset",
                "fast", "short_01.mp4"
            ]
        );
    }

    #[test]
    fn test_concat_command_uses_stream_copy() {
        let cmd = builder().concat_segments("concat.txt", "long_form.mp4");
        assert_eq!(
            cmd.args,
            vec![
                "-y", "-f", "concat", "-safe", "0", "-i", "concat.txt", "-c", "copy",
                "long_form.mp4"
            ]
        );
    }

    #[test]
    fn test_extract_audio_targets_recognizer_format() {
        let cmd = builder().extract_audio("in.mp4", "out.wav");
        assert_eq!(
            cmd.args,
            vec![
                "-i", "in.mp4", "-vn", "-c:a", "pcm_s16le", "-ar", "16000", "-ac", "1", "-y",
                "out.wav"
            ]
        );
    }
}
