//! Destination path validation.

use std::fs;
use std::path::Path;

use crate::error::{Result, SproutError};

/// Decides whether a path can become a fresh project root.
pub trait PathValidator: Send + Sync {
    /// Succeed when `path` does not exist or is an empty directory.
    fn validate(&self, path: &Path) -> Result<()>;
}

/// Validator that inspects the real filesystem.
///
/// Only directory emptiness is checked; file contents are never read.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyDirValidator;

impl PathValidator for EmptyDirValidator {
    fn validate(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }

        if !path.is_dir() {
            return Err(SproutError::InvalidDestination {
                path: path.to_path_buf(),
                reason: "path exists and is not a directory".to_string(),
            });
        }

        let mut entries = fs::read_dir(path).map_err(|e| SproutError::InvalidDestination {
            path: path.to_path_buf(),
            reason: format!("cannot read directory: {}", e),
        })?;

        if entries.next().is_some() {
            return Err(SproutError::InvalidDestination {
                path: path.to_path_buf(),
                reason: "directory is not empty".to_string(),
            });
        }

        Ok(())
    }
}
