//! Project materialization.
//!
//! Copies the cached template payload into the destination and creates the
//! fixed project skeleton:
//!
//! ```text
//! <destination>/
//!   config.xml      (lifted from www/ when present)
//!   www/...
//!   .cordova/
//!   hooks/
//!   platforms/
//!   plugins/
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::cache::{TemplateCache, MARKER_FILE, PAYLOAD_DIR};
use crate::error::{Result, SproutError};

use super::request::CreateRequest;

/// Directories created in every new project regardless of template content.
pub const SKELETON_DIRS: [&str; 4] = [".cordova", "hooks", "platforms", "plugins"];

/// Turns a cached template into a project directory.
pub trait ProjectMaterializer: Send + Sync {
    /// Populate `request.destination()` from the cached template for
    /// `request.version()`.
    fn create(&self, request: &CreateRequest) -> Result<()>;
}

/// Materializer that copies from a [`TemplateCache`] on the local
/// filesystem.
///
/// The cache is only read. Partial output is left in place on failure.
pub struct FsProjectMaterializer {
    cache: Arc<dyn TemplateCache>,
}

impl FsProjectMaterializer {
    /// Create a materializer reading templates from `cache`.
    pub fn new(cache: Arc<dyn TemplateCache>) -> Self {
        Self { cache }
    }
}

impl ProjectMaterializer for FsProjectMaterializer {
    fn create(&self, request: &CreateRequest) -> Result<()> {
        let destination = request.destination();
        let location = self.cache.locate(request.version());

        create_dir_all(destination)?;

        copy_dir_recursive(&location.payload_dir(), &destination.join(PAYLOAD_DIR))?;

        for dir in SKELETON_DIRS {
            create_dir_all(&destination.join(dir))?;
        }

        // Only the destination copy is moved; the cache stays untouched.
        let project_marker = destination.join(MARKER_FILE);
        let copied_marker = destination.join(PAYLOAD_DIR).join(MARKER_FILE);
        if copied_marker.is_file() {
            fs::rename(&copied_marker, &project_marker)
                .map_err(|e| SproutError::materialization(&project_marker, e))?;
        } else if location.marker_path().is_file() {
            fs::copy(location.marker_path(), &project_marker)
                .map_err(|e| SproutError::materialization(&project_marker, e))?;
        }

        tracing::debug!(
            "Created project at {} from {}",
            destination.display(),
            location
        );
        Ok(())
    }
}

fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| SproutError::materialization(path, e))
}

/// Copy `src` into `dst`, merging with anything already there and
/// overwriting files of the same name.
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    let entries = fs::read_dir(src).map_err(|e| SproutError::materialization(src, e))?;
    create_dir_all(dst)?;

    for entry in entries {
        let entry = entry.map_err(|e| SproutError::materialization(src, e))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        let file_type = entry
            .file_type()
            .map_err(|e| SproutError::materialization(&from, e))?;

        if file_type.is_dir() {
            copy_dir_recursive(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|e| SproutError::materialization(&to, e))?;
        }
    }

    Ok(())
}
