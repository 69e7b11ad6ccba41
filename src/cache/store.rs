//! Disk-backed template cache.

use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

use super::entry::{CachedTemplate, TemplateLocation, TemplateState};
use super::validation::template_state;
use crate::error::{Result, SproutError};

/// Maps platform versions to cached template directories.
///
/// Implementations must be cheap to query: the fetcher asks for the state
/// on every run instead of remembering a previous answer.
pub trait TemplateCache: Send + Sync {
    /// Directory that holds (or will hold) the template for `version`.
    ///
    /// Pure and deterministic; never depends on a project destination.
    fn locate(&self, version: &str) -> TemplateLocation;

    /// Current state of `location`.
    fn state(&self, location: &TemplateLocation) -> TemplateState;

    /// Recursively delete `location` when it is corrupt.
    ///
    /// Absent and valid locations are left alone, so this is safe to call
    /// unconditionally.
    fn evict_if_corrupt(&self, location: &TemplateLocation) -> Result<()>;
}

/// Template cache rooted at a user-level directory, one subdirectory per
/// version.
#[derive(Debug, Clone)]
pub struct DiskTemplateCache {
    root: PathBuf,
}

impl DiskTemplateCache {
    /// Create a cache rooted at `root`. Nothing is created on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List every version directory under the root, sorted by version.
    pub fn list(&self) -> Result<Vec<CachedTemplate>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let read_dir = fs::read_dir(&self.root).map_err(|source| SproutError::CacheError {
            path: self.root.clone(),
            source,
        })?;

        let mut templates = Vec::new();
        for entry in read_dir {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }

            let version = entry.file_name().to_string_lossy().into_owned();
            let location = TemplateLocation::new(entry.path());
            let modified_at = entry
                .metadata()
                .and_then(|m| m.modified())
                .ok()
                .map(DateTime::<Utc>::from);

            templates.push(CachedTemplate {
                state: self.state(&location),
                size_bytes: dir_size(location.path()),
                version,
                location,
                modified_at,
            });
        }

        templates.sort_by(|a, b| a.version.cmp(&b.version));
        Ok(templates)
    }

    /// Remove the cached template for `version`, whatever its state.
    ///
    /// Returns `false` when nothing was cached.
    pub fn remove(&self, version: &str) -> Result<bool> {
        let location = self.locate(version);
        if !location.path().exists() {
            return Ok(false);
        }

        remove_location(&location)?;
        Ok(true)
    }

    /// Remove every cached template. Returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let templates = self.list()?;
        for template in &templates {
            remove_location(&template.location)?;
        }
        Ok(templates.len())
    }

    /// Total size of all cached templates in bytes.
    pub fn total_size(&self) -> Result<u64> {
        Ok(self.list()?.iter().map(|t| t.size_bytes).sum())
    }
}

impl TemplateCache for DiskTemplateCache {
    fn locate(&self, version: &str) -> TemplateLocation {
        TemplateLocation::new(self.root.join(version))
    }

    fn state(&self, location: &TemplateLocation) -> TemplateState {
        template_state(location)
    }

    fn evict_if_corrupt(&self, location: &TemplateLocation) -> Result<()> {
        if self.state(location) != TemplateState::Corrupt {
            return Ok(());
        }

        tracing::warn!("Removing corrupt template at {}", location);
        remove_location(location)
    }
}

fn remove_location(location: &TemplateLocation) -> Result<()> {
    fs::remove_dir_all(location.path()).map_err(|source| SproutError::CacheError {
        path: location.path().to_path_buf(),
        source,
    })
}

fn dir_size(path: &Path) -> u64 {
    let Ok(entries) = fs::read_dir(path) else {
        return 0;
    };

    entries
        .filter_map(|e| e.ok())
        .map(|entry| match entry.file_type() {
            Ok(ft) if ft.is_dir() => dir_size(&entry.path()),
            Ok(ft) if ft.is_file() => entry.metadata().map(|m| m.len()).unwrap_or(0),
            _ => 0,
        })
        .sum()
}
