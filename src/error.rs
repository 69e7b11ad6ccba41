//! Error types for Sprout operations.
//!
//! This module defines [`SproutError`], the error type carried by every
//! stage of project creation, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Each pipeline stage maps its own failures onto one `SproutError` variant
//!   so the caller sees a single error channel
//! - Collaborators (HTTP, archive extraction) use `anyhow::Error` and are
//!   wrapped opaquely in [`SproutError::FetchFailure`]
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Sprout operations.
#[derive(Debug, Error)]
pub enum SproutError {
    /// The create request is missing a field or carries a malformed value.
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// The destination path cannot be used as a fresh project root.
    #[error("Invalid destination {path}: {reason}")]
    InvalidDestination { path: PathBuf, reason: String },

    /// The template archive for a version could not be downloaded.
    #[error("Failed to fetch template {version}: {source}")]
    FetchFailure {
        version: String,
        #[source]
        source: anyhow::Error,
    },

    /// A filesystem operation failed while creating the project.
    #[error("Failed to create project at {path}: {source}")]
    MaterializationFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A filesystem operation on the template cache failed.
    #[error("Template cache error at {path}: {source}")]
    CacheError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SproutError {
    /// Build an [`SproutError::InvalidRequest`] from a message.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Build a [`SproutError::MaterializationFailure`] for `path`.
    pub fn materialization(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::MaterializationFailure {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for Sprout operations.
pub type Result<T> = std::result::Result<T, SproutError>;
