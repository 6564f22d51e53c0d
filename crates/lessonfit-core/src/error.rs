//! Error types for Lessonfit Core
//!
//! This module defines all error types used throughout the optimization engine.
//! We use `thiserror` for ergonomic error definitions with automatic Display/Error implementations.

use crate::generation::GenerationMode;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for Lessonfit operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Main error type for engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// Target duration was zero, negative or not a number
    #[error("Invalid target duration: {0}s (must be a positive number of seconds)")]
    InvalidTarget(f64),

    /// Tolerance was negative or not a number
    #[error("Invalid tolerance: {0}s (must be a non-negative number of seconds)")]
    InvalidTolerance(f64),

    /// The generation collaborator returned something that is not a script
    #[error("Malformed generation output: {0}")]
    MalformedGeneration(String),

    /// The generation collaborator itself failed
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while invoking the generation collaborator
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("{mode} request failed: {source}")]
    Failed {
        mode: GenerationMode,
        #[source]
        source: anyhow::Error,
    },

    #[error("{mode} request timed out after {}s", .timeout.as_secs_f64())]
    TimedOut {
        mode: GenerationMode,
        timeout: Duration,
    },
}

impl GenerationError {
    /// Mode of the request that failed
    pub fn mode(&self) -> GenerationMode {
        match self {
            GenerationError::Failed { mode, .. } | GenerationError::TimedOut { mode, .. } => *mode,
        }
    }
}

impl EngineError {
    /// Build a malformed-output error from anything printable
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedGeneration(reason.into())
    }
}
