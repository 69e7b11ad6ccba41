//! Global template cache.
//!
//! Templates are cached per platform version under a user-level directory,
//! never inside a project. A cached copy is trusted only while its marker
//! file exists; see [`validation`].

pub mod entry;
pub mod store;
pub mod validation;

pub use entry::{CachedTemplate, TemplateLocation, TemplateState};
pub use store::{DiskTemplateCache, TemplateCache};
pub use validation::{template_state, MARKER_FILE, PAYLOAD_DIR};

/// Get the default cache directory.
pub fn default_cache_dir() -> std::path::PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("sprout")
        .join("templates")
}
