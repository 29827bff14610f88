//! The encoder seam used by the batch runner.

use super::Job;
use shortform_av::actions::{encode_vertical, vertical_encode_command};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Something that can turn a job's input into its output file.
pub trait Encoder: Send {
    /// Encode `job.input` into `job.output`, blocking until done.
    ///
    /// Returning [`shortform_av::Error::Interrupted`] aborts the whole batch;
    /// any other error fails only this job.
    fn encode(&self, job: &Job) -> shortform_av::Result<()>;

    /// Human-readable description of what `encode` would run.
    fn describe(&self, job: &Job) -> String {
        format!("encode {:?} -> {:?}", job.input, job.output)
    }
}

/// Encoder backed by the ffmpeg CLI.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    ffmpeg: PathBuf,
    stop_signal: Option<Arc<AtomicBool>>,
}

impl FfmpegEncoder {
    pub fn new(ffmpeg: PathBuf) -> Self {
        Self {
            ffmpeg,
            stop_signal: None,
        }
    }

    /// Locate ffmpeg, preferring `configured` when it exists.
    pub fn discover(configured: Option<&Path>) -> shortform_av::Result<Self> {
        let ffmpeg = shortform_av::get_tool_path("ffmpeg", configured)?;
        tracing::debug!("Using ffmpeg at {:?}", ffmpeg);
        Ok(Self::new(ffmpeg))
    }

    /// Kill the running ffmpeg when `flag` is raised.
    pub fn with_stop_signal(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_signal = Some(flag);
        self
    }

    pub fn ffmpeg(&self) -> &Path {
        &self.ffmpeg
    }
}

impl Encoder for FfmpegEncoder {
    fn encode(&self, job: &Job) -> shortform_av::Result<()> {
        encode_vertical(
            &self.ffmpeg,
            &job.input,
            &job.output,
            &job.preset.encode_settings(),
            self.stop_signal.clone(),
        )
        .map(|_| ())
    }

    fn describe(&self, job: &Job) -> String {
        vertical_encode_command(
            &self.ffmpeg,
            &job.input,
            &job.output,
            &job.preset.encode_settings(),
        )
        .command_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset;

    #[test]
    fn test_describe_renders_ffmpeg_line() {
        let encoder = FfmpegEncoder::new(PathBuf::from("ffmpeg"));
        let job = Job::new(
            PathBuf::from("in/clip.mov"),
            Path::new("out"),
            preset::resolve("youtube"),
        );
        assert_eq!(
            encoder.describe(&job),
            "ffmpeg -hwaccel cuda -i in/clip.mov -vf \
             'scale=1080:1920:force_original_aspect_ratio=decrease,pad=1080:1920:(ow-iw)/2:(oh-ih)/2' \
             -c:v h264_nvenc -b:v 8M -r 60 -c:a aac -b:a 128k -y out/clip_processed.mp4"
        );
    }

    #[test]
    fn test_discover_uses_configured_path() {
        let fake = tempfile::NamedTempFile::new().unwrap();
        let encoder = FfmpegEncoder::discover(Some(fake.path())).unwrap();
        assert_eq!(encoder.ffmpeg(), fake.path());
    }

    #[test]
    fn test_missing_ffmpeg_binary_fails_job() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clip.mp4");
        std::fs::write(&input, b"not really a video").unwrap();

        let encoder = FfmpegEncoder::new(PathBuf::from("nonexistent_ffmpeg_12345"));
        let job = Job::new(input, dir.path(), preset::resolve("tiktok"));
        let err = encoder.encode(&job).unwrap_err();
        assert!(matches!(err, shortform_av::Error::ToolNotFound { .. }));
    }
}
