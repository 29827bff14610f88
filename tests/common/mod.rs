//! Shared helpers for integration tests.
//!
//! Provides [`MockEncoder`] for driving the batch runner without ffmpeg and,
//! on unix, a stand-in ffmpeg script for end-to-end CLI runs.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use shortform::batch::{Encoder, Job};

/// Encoder that records every job and writes a small file to `job.output`.
///
/// Inputs whose file name contains one of `fail_on` fail with a canned
/// ffmpeg-style diagnostic.
#[derive(Clone, Default)]
pub struct MockEncoder {
    pub calls: Arc<Mutex<Vec<PathBuf>>>,
    pub fail_on: Vec<&'static str>,
    pub contents: &'static str,
}

impl MockEncoder {
    pub fn new() -> Self {
        Self {
            contents: "encoded",
            ..Default::default()
        }
    }

    pub fn failing_on(mut self, name: &'static str) -> Self {
        self.fail_on.push(name);
        self
    }

    pub fn writing(mut self, contents: &'static str) -> Self {
        self.contents = contents;
        self
    }

    /// File names of the inputs encoded so far, in call order.
    pub fn called_names(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }
}

impl Encoder for MockEncoder {
    fn encode(&self, job: &Job) -> shortform_av::Result<()> {
        self.calls.lock().unwrap().push(job.input.clone());

        let name = job.input_name();
        if self.fail_on.iter().any(|f| name.contains(f)) {
            return Err(shortform_av::Error::tool_failed(
                "ffmpeg",
                format!("{name}: Invalid data found when processing input"),
            ));
        }

        fs::write(&job.output, self.contents)?;
        Ok(())
    }
}

/// Create empty files with the given names inside `dir`.
pub fn touch_all(dir: &Path, names: &[&str]) {
    fs::create_dir_all(dir).unwrap();
    for name in names {
        fs::write(dir.join(name), b"source").unwrap();
    }
}

/// Sorted file names directly inside `dir`.
pub fn list_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

/// Stand-in for ffmpeg: writes its own argument list into the last argument
/// (the output path). Fails when the `-i` file does not exist or its path
/// contains "corrupt".
#[cfg(unix)]
pub const FAKE_FFMPEG: &str = r#"#!/bin/sh
prev=""
for arg; do
  if [ "$prev" = "-i" ] && [ ! -f "$arg" ]; then
    echo "$arg: No such file or directory" >&2
    exit 1
  fi
  prev=$arg
  last=$arg
done
case "$*" in
  *corrupt*)
    echo "corrupt input: Invalid data found when processing input" >&2
    exit 1
    ;;
esac
printf '%s\n' "$*" > "$last"
"#;

/// Write an executable fake ffmpeg into `dir` and return its path.
#[cfg(unix)]
pub fn install_fake_ffmpeg(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-ffmpeg");
    fs::write(&path, FAKE_FFMPEG).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Write a config file pointing at `ffmpeg` and return its path.
pub fn write_config(dir: &Path, ffmpeg: &Path, extra: &str) -> PathBuf {
    let path = dir.join("shortform.toml");
    fs::write(
        &path,
        format!(
            "[tools]\nffmpeg_path = {:?}\n\n{}",
            ffmpeg.to_string_lossy(),
            extra
        ),
    )
    .unwrap();
    path
}
