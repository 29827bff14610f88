//! Shortform - batch converter for vertical short-form video
//!
//! This library crate exposes the core functionality for integration testing.

pub mod batch;
pub mod config;
pub mod postprocess;
pub mod preset;
