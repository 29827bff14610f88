//! Input discovery.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Container extensions picked up from the input directory.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov"];

/// Check if a path has one of the accepted video extensions (any case).
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// List the video files directly inside `dir`, sorted by file name.
///
/// Subdirectories are not descended into. Entries that cannot be read, such
/// as dangling symlinks, are skipped.
///
/// # Errors
///
/// Fails if `dir` does not exist, is not a directory, or cannot be read.
pub fn discover_videos(dir: &Path) -> Result<Vec<PathBuf>> {
    let metadata = std::fs::metadata(dir)
        .with_context(|| format!("Failed to read input directory: {:?}", dir))?;
    if !metadata.is_dir() {
        anyhow::bail!("Input path is not a directory: {:?}", dir);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            // Only the directory itself is fatal; a broken entry is skipped.
            Err(err) if err.depth() > 0 => {
                match err.path() {
                    Some(path) if is_video_file(path) => {
                        tracing::warn!("Skipping unreadable video {:?}: {}", path, err)
                    }
                    _ => tracing::debug!("Skipping unreadable entry: {}", err),
                }
                continue;
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read input directory: {:?}", dir))
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if is_video_file(entry.path()) {
            files.push(entry.into_path());
        } else {
            tracing::trace!("Skipping non-video file: {:?}", entry.path());
        }
    }

    Ok(files)
}
