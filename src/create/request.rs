//! Create requests.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::{Result, SproutError};

/// Versions become a cache directory name, so they must be a single safe
/// path component.
static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z][0-9A-Za-z._+-]*$").unwrap());

/// A request to create one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    destination: PathBuf,
    version: String,
}

impl CreateRequest {
    /// Build a request, rejecting empty or malformed fields.
    pub fn new(destination: impl Into<PathBuf>, version: impl Into<String>) -> Result<Self> {
        let request = Self {
            destination: destination.into(),
            version: version.into(),
        };
        request.validate()?;
        Ok(request)
    }

    /// Where the project is created.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Platform version of the template.
    pub fn version(&self) -> &str {
        &self.version
    }

    fn validate(&self) -> Result<()> {
        if self.destination.as_os_str().is_empty() {
            return Err(SproutError::invalid_request("a destination path is required"));
        }

        if self.version.is_empty() {
            return Err(SproutError::invalid_request("a platform version is required"));
        }

        if !VERSION_PATTERN.is_match(&self.version) {
            return Err(SproutError::invalid_request(format!(
                "'{}' is not a valid platform version",
                self.version
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_path_and_version() {
        let request = CreateRequest::new("path/to/app", "3.3.0").unwrap();
        assert_eq!(request.destination(), Path::new("path/to/app"));
        assert_eq!(request.version(), "3.3.0");
    }

    #[test]
    fn rejects_empty_fields() {
        assert!(CreateRequest::new("", "3.3.0").is_err());
        assert!(CreateRequest::new("app", "").is_err());
    }

    #[test]
    fn rejects_versions_that_escape_the_cache() {
        for version in ["../3.3.0", "3.3.0/..", "..", ".hidden", "3.3 0", "a\\b"] {
            let err = CreateRequest::new("app", version).unwrap_err();
            assert!(
                matches!(err, SproutError::InvalidRequest { .. }),
                "{version} should be rejected"
            );
        }
    }

    #[test]
    fn accepts_prerelease_versions() {
        for version in ["3.3.0", "3.4.0-rc.1", "edge", "4.0.0+build5"] {
            assert!(CreateRequest::new("app", version).is_ok(), "{version}");
        }
    }
}
