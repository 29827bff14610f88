//! Error types for shortform-av.

use std::path::PathBuf;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or running encoder invocations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required external tool is not available.
    #[error("tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// An external tool ran but exited unsuccessfully.
    #[error("tool execution failed: {tool}: {message}")]
    ToolFailed { tool: String, message: String },

    /// The tool was stopped because the caller raised its stop flag.
    #[error("{tool} interrupted")]
    Interrupted { tool: String },

    /// The specified file was not found.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a tool not found error.
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create a tool execution failed error.
    pub fn tool_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create an interrupted error.
    pub fn interrupted(tool: impl Into<String>) -> Self {
        Self::Interrupted { tool: tool.into() }
    }

    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Whether this error means the caller asked the tool to stop.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted { .. })
    }

    /// Diagnostic text suitable for a one-line failure report.
    ///
    /// For a failed tool this is the tool's own message (usually its stderr),
    /// without the `tool execution failed` prefix.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::ToolFailed { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_failed_display() {
        let err = Error::tool_failed("ffmpeg", "exit status 1");
        assert_eq!(err.to_string(), "tool execution failed: ffmpeg: exit status 1");
        assert_eq!(err.diagnostic(), "exit status 1");
    }

    #[test]
    fn interrupted_is_flagged() {
        let err = Error::interrupted("ffmpeg");
        assert!(err.is_interrupted());
        assert!(!Error::tool_not_found("ffmpeg").is_interrupted());
        assert_eq!(err.to_string(), "ffmpeg interrupted");
    }

    #[test]
    fn file_not_found_display() {
        let err = Error::file_not_found("/missing/clip.mov");
        assert_eq!(err.to_string(), "file not found: /missing/clip.mov");
    }
}
