//! Batch runner.
//!
//! Discovers the video files in an input directory and encodes them one at a
//! time. A failed encode is reported and the batch moves on; only an
//! interruption stops it early.

mod discover;
mod encoder;
mod job;

pub use discover::{discover_videos, is_video_file, VIDEO_EXTENSIONS};
pub use encoder::{Encoder, FfmpegEncoder};
pub use job::{output_path_for, Job, JobState, RunResult, OUTPUT_EXTENSION, OUTPUT_SUFFIX};

use crate::postprocess::{Passthrough, PostProcess};
use crate::preset::Preset;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fatal batch-level failures that callers may want to match on.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("batch interrupted after {completed} of {total} job(s)")]
    Interrupted { completed: usize, total: usize },
}

/// Summary of one batch run.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Where outputs were written.
    pub output_dir: PathBuf,
    /// Number of video files discovered.
    pub discovered: usize,
    /// One entry per executed job, in processing order. Empty for dry runs.
    pub results: Vec<RunResult>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    /// True when no job failed.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Runs every discovered file through an [`Encoder`], sequentially.
pub struct BatchRunner {
    encoder: Box<dyn Encoder>,
    post_process: Box<dyn PostProcess>,
    stop_signal: Arc<AtomicBool>,
    dry_run: bool,
}

impl BatchRunner {
    pub fn new(encoder: impl Encoder + 'static) -> Self {
        Self {
            encoder: Box::new(encoder),
            post_process: Box::new(Passthrough),
            stop_signal: Arc::new(AtomicBool::new(false)),
            dry_run: false,
        }
    }

    /// Replace the post-processing stage (default: [`Passthrough`]).
    pub fn with_post_process(mut self, stage: impl PostProcess + 'static) -> Self {
        self.post_process = Box::new(stage);
        self
    }

    /// Share an externally owned stop flag.
    pub fn with_stop_signal(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_signal = flag;
        self
    }

    /// Print the planned encoder invocations instead of running them.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Encode every video file in `input_dir` into `output_dir`.
    ///
    /// # Errors
    ///
    /// Fails before any job runs if the output directory cannot be created or
    /// the input directory cannot be read. Fails with
    /// [`BatchError::Interrupted`] if the stop signal is raised. Individual
    /// encode failures are recorded in the report, not returned.
    pub fn run(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        preset: &'static Preset,
    ) -> Result<BatchReport> {
        if !self.dry_run {
            std::fs::create_dir_all(output_dir)
                .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;
        }

        let inputs = discover_videos(input_dir)?;
        let mut report = BatchReport {
            output_dir: output_dir.to_path_buf(),
            discovered: inputs.len(),
            results: Vec::with_capacity(inputs.len()),
        };

        if inputs.is_empty() {
            println!("No video files found in {}", input_dir.display());
            return Ok(report);
        }

        info!("Encoding with preset {}", preset);
        println!("Found {} video(s) to process\n", inputs.len());

        let total = inputs.len();
        for input in inputs {
            let job = Job::new(input, output_dir, preset);

            if self.dry_run {
                println!("[DRY RUN] {}", self.encoder.describe(&job));
                continue;
            }

            if self.stop_signal.load(Ordering::Relaxed) {
                return Err(self.interrupted(report.results.len(), total));
            }

            match self.process(job) {
                Ok(result) => {
                    println!("{}", result);
                    report.results.push(result);
                }
                Err(e) => {
                    debug!("{}", e);
                    return Err(self.interrupted(report.results.len(), total));
                }
            }
        }

        if self.dry_run {
            println!(
                "\n[DRY RUN] Would encode {} file(s) into {}",
                total,
                output_dir.display()
            );
        } else {
            println!("\n✓ Pipeline complete! Output: {}", output_dir.display());
        }

        Ok(report)
    }

    /// Run one job to a terminal state. Only an interruption is an error.
    fn process(&self, mut job: Job) -> std::result::Result<RunResult, shortform_av::Error> {
        println!("Processing: {}", job.input_name());
        job.start();

        match self.encoder.encode(&job) {
            Ok(()) => match self.post_process.process(&job.output) {
                Ok(output) => job.succeed(output),
                Err(e) => {
                    let stage = self.post_process.name();
                    warn!("{} failed for {:?}: {:#}", stage, job.output, e);
                    job.fail(format!("{}: {:#}", stage, e));
                }
            },
            Err(e) if e.is_interrupted() => return Err(e),
            Err(e) => {
                debug!("Encode failed for {:?}: {}", job.input, e);
                job.fail(e.diagnostic());
            }
        }

        let input = job.input.clone();
        Ok(job.into_result().unwrap_or_else(|| RunResult::Failed {
            input,
            error: "job did not finish".to_string(),
        }))
    }

    fn interrupted(&self, completed: usize, total: usize) -> anyhow::Error {
        warn!("Stop requested, abandoning remaining jobs");
        BatchError::Interrupted { completed, total }.into()
    }
}
