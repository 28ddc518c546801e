//! Unified Error Type System
//!
//! Centralized error type for the whole generator.
//!
//! ## Fatality
//!
//! - **MissingTemplate**: aborts the build
//! - **Parse** / **Timeout**: degraded to an empty file result by the coordinator
//! - everything else propagates to the caller of the failing stage

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StylebookError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Glob pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    // -------------------------------------------------------------------------
    // Pipeline Errors
    // -------------------------------------------------------------------------
    #[error("Cannot read the template file: {}", path.display())]
    MissingTemplate { path: PathBuf },

    #[error("Parse error in {path}: {message}")]
    Parse { message: String, path: String },

    /// Operation timeout with context
    #[error("Timeout after {duration:?}: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    #[error("Task failed: {0}")]
    Join(String),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("{context}: {message}")]
    Context { context: String, message: String },
}

impl From<tokio::task::JoinError> for StylebookError {
    fn from(err: tokio::task::JoinError) -> Self {
        StylebookError::Join(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StylebookError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl StylebookError {
    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a parse error for a source file
    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Whether the error must abort the whole build
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingTemplate { .. } | Self::Config(_))
    }
}

/// Context extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> Result<T>;

    /// Add context using a closure (lazy evaluation)
    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> Result<T> {
        self.map_err(|e| StylebookError::Context {
            context: context.into(),
            message: e.to_string(),
        })
    }

    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| StylebookError::Context {
            context: f().into(),
            message: e.to_string(),
        })
    }
}
