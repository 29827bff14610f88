//! Per-file jobs and their outcomes.

use crate::preset::Preset;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

/// Suffix appended to the input stem to name the output file.
pub const OUTPUT_SUFFIX: &str = "_processed";

/// Container extension of every output file.
pub const OUTPUT_EXTENSION: &str = "mp4";

/// Derive the output path for `input` inside `output_dir`.
///
/// `clip.mov` becomes `<output_dir>/clip_processed.mp4`. Inputs that share a
/// stem map to the same output; the later job overwrites the earlier one.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(OsStr::to_os_string)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(OUTPUT_SUFFIX);
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    output_dir.join(name)
}

/// Lifecycle of a job. `Succeeded` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Running,
    Succeeded { output: PathBuf },
    Failed { error: String },
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Succeeded { .. } | JobState::Failed { .. })
    }
}

/// One input file paired with its preset and output path.
#[derive(Debug, Clone)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
    pub preset: &'static Preset,
    state: JobState,
}

impl Job {
    pub fn new(input: PathBuf, output_dir: &Path, preset: &'static Preset) -> Self {
        let output = output_path_for(&input, output_dir);
        Self {
            input,
            output,
            preset,
            state: JobState::Pending,
        }
    }

    pub fn state(&self) -> &JobState {
        &self.state
    }

    /// Display name of the input file.
    pub fn input_name(&self) -> String {
        file_name(&self.input)
    }

    /// Pending -> Running.
    pub fn start(&mut self) {
        self.transition(JobState::Running);
    }

    /// Running -> Succeeded.
    pub fn succeed(&mut self, output: PathBuf) {
        self.transition(JobState::Succeeded { output });
    }

    /// Running -> Failed.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.transition(JobState::Failed {
            error: error.into(),
        });
    }

    fn transition(&mut self, next: JobState) {
        let allowed = matches!(
            (&self.state, &next),
            (JobState::Pending, JobState::Running)
                | (JobState::Running, JobState::Succeeded { .. })
                | (JobState::Running, JobState::Failed { .. })
        );
        if allowed {
            self.state = next;
        } else {
            tracing::warn!(
                "Ignoring job state change {:?} -> {:?} for {:?}",
                self.state,
                next,
                self.input
            );
        }
    }

    /// Consume a finished job into its result. Returns `None` while the job
    /// has not reached a terminal state.
    pub fn into_result(self) -> Option<RunResult> {
        match self.state {
            JobState::Succeeded { output } => Some(RunResult::Succeeded {
                input: self.input,
                output,
            }),
            JobState::Failed { error } => Some(RunResult::Failed {
                input: self.input,
                error,
            }),
            JobState::Pending | JobState::Running => None,
        }
    }
}

/// Outcome of one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunResult {
    Succeeded { input: PathBuf, output: PathBuf },
    Failed { input: PathBuf, error: String },
}

impl RunResult {
    pub fn input(&self) -> &Path {
        match self {
            RunResult::Succeeded { input, .. } | RunResult::Failed { input, .. } => input,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunResult::Succeeded { .. })
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunResult::Succeeded { output, .. } => write!(f, "✓ Completed: {}", file_name(output)),
            RunResult::Failed { input, error } => {
                write!(f, "✗ Error processing {}: {}", file_name(input), error)
            }
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
