//! Cache location and listing types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use super::validation::{MARKER_FILE, PAYLOAD_DIR};

/// On-disk directory holding the cached template for one version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateLocation(PathBuf);

impl TemplateLocation {
    /// Wrap a directory path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// The template directory itself.
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// The payload subtree copied into new projects (`www/`).
    pub fn payload_dir(&self) -> PathBuf {
        self.0.join(PAYLOAD_DIR)
    }

    /// Marker file at the top level of the template.
    pub fn marker_path(&self) -> PathBuf {
        self.0.join(MARKER_FILE)
    }

    /// Marker file at the top level of the payload.
    pub fn payload_marker_path(&self) -> PathBuf {
        self.payload_dir().join(MARKER_FILE)
    }
}

impl AsRef<Path> for TemplateLocation {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for TemplateLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Health of a cached template, recomputed from disk on every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateState {
    /// The template directory does not exist.
    Absent,
    /// The directory exists but the marker file is missing.
    Corrupt,
    /// The directory exists and contains the marker file.
    Valid,
}

impl TemplateState {
    /// Short lowercase label for listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Corrupt => "corrupt",
            Self::Valid => "valid",
        }
    }
}

/// A template found in the cache root, as reported by `sprout cache list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedTemplate {
    /// Platform version (the directory name).
    pub version: String,
    /// Where the template lives.
    pub location: TemplateLocation,
    /// Current state.
    pub state: TemplateState,
    /// Total size of regular files, in bytes.
    pub size_bytes: u64,
    /// Last modification time of the template directory.
    pub modified_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_paths_derive_from_root() {
        let location = TemplateLocation::new("/cache/3.3.0");
        assert_eq!(location.payload_dir(), PathBuf::from("/cache/3.3.0/www"));
        assert_eq!(location.marker_path(), PathBuf::from("/cache/3.3.0/config.xml"));
        assert_eq!(
            location.payload_marker_path(),
            PathBuf::from("/cache/3.3.0/www/config.xml")
        );
    }

    #[test]
    fn state_labels() {
        assert_eq!(TemplateState::Absent.label(), "absent");
        assert_eq!(TemplateState::Corrupt.label(), "corrupt");
        assert_eq!(TemplateState::Valid.label(), "valid");
    }

    #[test]
    fn state_serializes_lowercase() {
        let json = serde_json::to_string(&TemplateState::Corrupt).unwrap();
        assert_eq!(json, "\"corrupt\"");
    }
}
