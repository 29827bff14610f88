//! Post-processing stages run on each successfully encoded file.
//!
//! Caption generation (transcribe, then burn subtitles into the video) plugs
//! in here. Until it exists the runner uses [`Passthrough`].

use anyhow::Result;
use std::path::{Path, PathBuf};

/// A stage that takes a finished output file and returns the file that
/// should be reported as the job's result (possibly a new one).
pub trait PostProcess: Send {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn process(&self, video: &Path) -> Result<PathBuf>;
}

/// Returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl PostProcess for Passthrough {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn process(&self, video: &Path) -> Result<PathBuf> {
        Ok(video.to_path_buf())
    }
}
