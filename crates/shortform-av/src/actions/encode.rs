//! Vertical short-form encoding through the ffmpeg CLI.

use crate::{Error, Result, ToolCommand, ToolOutput};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Hardware acceleration hint passed to `-hwaccel`.
pub const DEFAULT_HWACCEL: &str = "cuda";

/// Audio is always re-encoded to AAC.
pub const AUDIO_CODEC: &str = "aac";

/// Fixed audio bitrate.
pub const AUDIO_BITRATE: &str = "128k";

/// Video parameters for one encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeSettings {
    /// Target frame width in pixels.
    pub width: u32,
    /// Target frame height in pixels.
    pub height: u32,
    /// Output frame rate.
    pub frame_rate: u32,
    /// Video bitrate in ffmpeg notation (e.g. `5M`).
    pub video_bitrate: String,
    /// ffmpeg encoder name (e.g. `h264_nvenc`).
    pub video_codec: String,
    /// Value for `-hwaccel`; `None` omits the flag.
    pub hwaccel: Option<String>,
}

impl EncodeSettings {
    /// Settings with the default hardware acceleration hint.
    pub fn new(
        width: u32,
        height: u32,
        frame_rate: u32,
        video_bitrate: impl Into<String>,
        video_codec: impl Into<String>,
    ) -> Self {
        Self {
            width,
            height,
            frame_rate,
            video_bitrate: video_bitrate.into(),
            video_codec: video_codec.into(),
            hwaccel: Some(DEFAULT_HWACCEL.to_string()),
        }
    }
}

/// Scale to fit inside `width`x`height` keeping the aspect ratio, then pad
/// to exactly that size with the picture centered.
pub fn fit_and_pad_filter(width: u32, height: u32) -> String {
    format!(
        "scale={width}:{height}:force_original_aspect_ratio=decrease,\
         pad={width}:{height}:(ow-iw)/2:(oh-ih)/2"
    )
}

/// Build the ffmpeg invocation for a vertical encode.
///
/// The output file is always overwritten (`-y`).
pub fn vertical_encode_command(
    ffmpeg: &Path,
    input: &Path,
    output: &Path,
    settings: &EncodeSettings,
) -> ToolCommand {
    let mut cmd = ToolCommand::new(ffmpeg.to_path_buf());

    if let Some(ref hwaccel) = settings.hwaccel {
        cmd.args(["-hwaccel", hwaccel.as_str()]);
    }

    cmd.arg("-i")
        .arg(input)
        .arg("-vf")
        .arg(fit_and_pad_filter(settings.width, settings.height))
        .args(["-c:v", settings.video_codec.as_str()])
        .args(["-b:v", settings.video_bitrate.as_str()])
        .arg("-r")
        .arg(settings.frame_rate.to_string())
        .args(["-c:a", AUDIO_CODEC, "-b:a", AUDIO_BITRATE])
        .arg("-y")
        .arg(output);

    cmd
}

/// Encode `input` into `output` with the given settings.
///
/// Blocks until ffmpeg exits. When `stop` is provided and raised while ffmpeg
/// is running, the process is killed and [`Error::Interrupted`] is returned.
pub fn encode_vertical(
    ffmpeg: &Path,
    input: &Path,
    output: &Path,
    settings: &EncodeSettings,
    stop: Option<Arc<AtomicBool>>,
) -> Result<ToolOutput> {
    if !input.exists() {
        return Err(Error::file_not_found(input));
    }

    let mut cmd = vertical_encode_command(ffmpeg, input, output, settings);
    if let Some(flag) = stop {
        cmd.stop_signal(flag);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!("Running: {}", cmd.command_line());

    let result = cmd.execute();

    #[cfg(feature = "tracing")]
    match &result {
        Ok(_) => tracing::debug!("Encoded {:?} -> {:?}", input, output),
        Err(e) => tracing::debug!("Encode of {:?} failed: {}", input, e),
    }

    result
}
