//! # APS Tools
//!
//! File and terminal side of the shell workbench:
//! - RON job and context loading
//! - HTML, BBCode and plain-text result tables
//! - Verification against in-game measurements

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

use aps_core::error::ShellError;
use thiserror::Error;

pub mod job;
pub mod report;
pub mod verify;

/// Error type for tool operations.
#[derive(Error, Debug)]
pub enum ToolError {
    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse RON: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    /// Failed to encode JSON.
    #[error("Failed to encode JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Shell calculation failed.
    #[error(transparent)]
    Shell(#[from] ShellError),
}

/// Result type alias using [`ToolError`].
pub type Result<T> = std::result::Result<T, ToolError>;
