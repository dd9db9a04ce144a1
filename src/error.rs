//! Error types for botctl operations.
//!
//! This module defines [`BotctlError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Missing tools and missing files carry a remediation hint for the operator
//! - External process failures carry the command line and its exit code
//! - Use `anyhow::Error` (via `BotctlError::Other`) for unexpected errors
//!
//! Every variant is fatal to the running workflow. Only the status report
//! swallows errors, and it does so section by section.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for botctl operations.
#[derive(Debug, Error)]
pub enum BotctlError {
    /// A required tool is not installed and could not be remediated.
    #[error("Required tool '{tool}' not found. {hint}")]
    ToolMissing { tool: String, hint: String },

    /// A required file or directory does not exist.
    #[error("Missing {}. {hint}", path.display())]
    FileMissing { path: PathBuf, hint: String },

    /// External command exited non-zero (or could not be spawned).
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Interpreter is older than the configured minimum.
    #[error("Python {found} is too old; {required} or newer is required")]
    VersionTooOld { found: String, required: String },

    /// Failed to parse a configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Unit template references an unknown variable or is malformed.
    #[error("Template error: {message}")]
    TemplateError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BotctlError {
    /// Shorthand for a [`BotctlError::FileMissing`].
    pub fn file_missing(path: impl Into<PathBuf>, hint: impl Into<String>) -> Self {
        Self::FileMissing {
            path: path.into(),
            hint: hint.into(),
        }
    }

    /// Shorthand for a [`BotctlError::ToolMissing`].
    pub fn tool_missing(tool: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::ToolMissing {
            tool: tool.into(),
            hint: hint.into(),
        }
    }
}

/// Result type alias for botctl operations.
pub type Result<T> = std::result::Result<T, BotctlError>;
