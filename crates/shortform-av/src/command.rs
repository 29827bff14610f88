//! Builder for executing external tool commands with captured output.
//!
//! Commands run synchronously. When a stop flag is attached, the child is
//! polled instead of waited on and killed as soon as the flag is raised.

use crate::{Error, Result};
use std::ffi::{OsStr, OsString};
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// How often a running child is checked against the stop flag.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Output captured from a tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit status.
    pub status: ExitStatus,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

/// A builder for constructing and executing external tool invocations.
///
/// # Example
///
/// ```no_run
/// use shortform_av::ToolCommand;
/// use std::path::PathBuf;
///
/// let output = ToolCommand::new(PathBuf::from("ffmpeg"))
///     .arg("-hide_banner")
///     .arg("-version")
///     .execute()?;
/// println!("{}", output.stdout);
/// # Ok::<(), shortform_av::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
    stop: Option<Arc<AtomicBool>>,
}

impl ToolCommand {
    /// Create a new command for the given program path.
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            args: Vec::new(),
            stop: None,
        }
    }

    /// Append a single argument. Paths are passed through unchanged, even
    /// when they are not valid UTF-8.
    pub fn arg(&mut self, s: impl AsRef<OsStr>) -> &mut Self {
        self.args.push(s.as_ref().to_os_string());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl AsRef<OsStr>>) -> &mut Self {
        self.args
            .extend(iter.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Kill the child and return [`Error::Interrupted`] once `flag` is set.
    pub fn stop_signal(&mut self, flag: Arc<AtomicBool>) -> &mut Self {
        self.stop = Some(flag);
        self
    }

    /// The arguments collected so far.
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Render the command as a shell-style line, quoting where needed.
    ///
    /// For display only: non-UTF-8 arguments are rendered lossily.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|part| shell_quote(&part.to_string_lossy()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }

    /// Execute the command, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// - [`Error::ToolNotFound`] if the program does not exist.
    /// - [`Error::ToolFailed`] if the process exits with a non-zero status
    ///   (message is the trimmed stderr).
    /// - [`Error::Interrupted`] if the stop flag was raised while running.
    /// - [`Error::Io`] for any other spawn or wait failure.
    pub fn execute(&self) -> Result<ToolOutput> {
        let program_name = self.program_name();

        if self.is_stopped() {
            return Err(Error::interrupted(program_name));
        }

        let mut child = std::process::Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found(program_name.clone())
                } else {
                    Error::Io(e)
                }
            })?;

        // Drain both pipes on their own threads so a chatty child never
        // blocks on a full pipe while we poll it.
        let stdout_reader = drain(child.stdout.take());
        let stderr_reader = drain(child.stderr.take());

        let status = match self.wait(&mut child) {
            Ok(status) => status,
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                let _ = stdout_reader.join();
                let _ = stderr_reader.join();
                return Err(e);
            }
        };

        let output = ToolOutput {
            status,
            stdout: String::from_utf8_lossy(&stdout_reader.join().unwrap_or_default())
                .to_string(),
            stderr: String::from_utf8_lossy(&stderr_reader.join().unwrap_or_default())
                .to_string(),
        };

        if !status.success() {
            let stderr = output.stderr.trim();
            let message = if stderr.is_empty() {
                format!("exited with status {status}")
            } else {
                stderr.to_string()
            };
            return Err(Error::tool_failed(program_name, message));
        }

        Ok(output)
    }

    fn wait(&self, child: &mut Child) -> Result<ExitStatus> {
        let Some(stop) = self.stop.as_ref() else {
            return Ok(child.wait()?);
        };

        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if stop.load(Ordering::Relaxed) {
                #[cfg(feature = "tracing")]
                tracing::warn!("Stop requested, killing {}", self.program_name());
                return Err(Error::interrupted(self.program_name()));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn is_stopped(&self) -> bool {
        self.stop
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

fn shell_quote(part: &str) -> String {
    let plain = !part.is_empty()
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,+@%".contains(c));
    if plain {
        part.to_string()
    } else {
        format!("'{}'", part.replace('\'', r"'\''"))
    }
}
