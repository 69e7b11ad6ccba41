//! Configuration schema for Sprout.
//!
//! Maps to the YAML format of `~/.sprout/config.yml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Placeholder substituted with the platform version in `template_url`.
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SproutConfig {
    /// Root of the global template cache (defaults to the user cache dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// Archive URL with a `{version}` placeholder
    pub template_url: String,

    /// Timeout applied to each template download
    pub download_timeout_secs: u64,

    /// Platform version used when `create` is given no `--platform-version`
    pub default_version: String,
}

impl Default for SproutConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            template_url: default_template_url(),
            download_timeout_secs: 60,
            default_version: "3.3.0".to_string(),
        }
    }
}

fn default_template_url() -> String {
    format!(
        "https://github.com/phonegap/phonegap-app-hello-world/archive/{}.tar.gz",
        VERSION_PLACEHOLDER
    )
}

impl SproutConfig {
    /// Resolved cache root: the configured directory or the platform default.
    pub fn cache_root(&self) -> PathBuf {
        self.cache_dir
            .clone()
            .unwrap_or_else(crate::cache::default_cache_dir)
    }

    /// Download timeout as a [`Duration`].
    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    /// Apply `SPROUT_*` overrides using the given variable lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("SPROUT_CACHE_DIR").filter(|v| !v.is_empty()) {
            self.cache_dir = Some(PathBuf::from(dir));
        }
        if let Some(url) = lookup("SPROUT_TEMPLATE_URL").filter(|v| !v.is_empty()) {
            self.template_url = url;
        }
    }
}
