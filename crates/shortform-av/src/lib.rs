//! # shortform-av
//!
//! ffmpeg plumbing for the shortform pipeline.
//!
//! This crate provides:
//! - Construction of the vertical encode invocation (scale-to-fit, centered
//!   pad, preset codec/bitrate/frame rate, AAC audio)
//! - Synchronous command execution with captured output and a cooperative
//!   stop flag
//! - External tool detection
//!
//! ## Features
//!
//! - `tracing` - Enable tracing support
//!
//! ## Example
//!
//! ```no_run
//! use shortform_av::{actions::{encode_vertical, EncodeSettings}, require_tool};
//! use std::path::Path;
//!
//! let ffmpeg = require_tool("ffmpeg")?;
//! let settings = EncodeSettings::new(1080, 1920, 30, "5M", "h264_nvenc");
//! encode_vertical(
//!     &ffmpeg,
//!     Path::new("input/clip.mov"),
//!     Path::new("output/clip_processed.mp4"),
//!     &settings,
//!     None,
//! )?;
//! # Ok::<(), shortform_av::Error>(())
//! ```

pub mod actions;
mod command;
mod error;
pub mod tools;

// Re-exports
pub use command::{ToolCommand, ToolOutput};
pub use error::{Error, Result};
pub use tools::{check_tool, check_tools, get_tool_path, require_tool, ToolInfo};
