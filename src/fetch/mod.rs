//! Template acquisition.
//!
//! [`CachedTemplateFetcher`] makes sure a valid template for a version is in
//! the cache, downloading it through a [`Downloader`] when it is absent and
//! evicting it first when a previous download left it corrupt.

pub mod archive;
pub mod http;

pub use archive::unpack_template;
pub use http::HttpDownloader;

use std::path::Path;
use std::sync::Arc;

use crate::cache::{TemplateCache, TemplateState};
use crate::config::VERSION_PLACEHOLDER;
use crate::error::{Result, SproutError};

/// Fetches a template archive and expands it into a directory.
pub trait Downloader: Send + Sync {
    /// Download `url` and unpack it into `destination`.
    fn download(&self, url: &str, destination: &Path) -> anyhow::Result<()>;
}

/// Ensures a valid cached template exists for a version.
pub trait TemplateFetcher: Send + Sync {
    /// Make the template for `version` available in the cache.
    fn ensure(&self, version: &str) -> Result<()>;
}

/// Substitute `version` into a template URL pattern.
pub fn template_url_for(pattern: &str, version: &str) -> String {
    pattern.replace(VERSION_PLACEHOLDER, version)
}

/// Fetcher backed by a [`TemplateCache`] and a [`Downloader`].
///
/// The cache state is re-read on every call. A failed download is not
/// retried here; the next call sees the location as absent or corrupt and
/// starts over.
pub struct CachedTemplateFetcher {
    cache: Arc<dyn TemplateCache>,
    downloader: Arc<dyn Downloader>,
    url_pattern: String,
}

impl CachedTemplateFetcher {
    /// Create a fetcher downloading from `url_pattern` (with a `{version}`
    /// placeholder).
    pub fn new(
        cache: Arc<dyn TemplateCache>,
        downloader: Arc<dyn Downloader>,
        url_pattern: impl Into<String>,
    ) -> Self {
        Self {
            cache,
            downloader,
            url_pattern: url_pattern.into(),
        }
    }

    /// URL the template for `version` is downloaded from.
    pub fn url_for(&self, version: &str) -> String {
        template_url_for(&self.url_pattern, version)
    }
}

impl TemplateFetcher for CachedTemplateFetcher {
    fn ensure(&self, version: &str) -> Result<()> {
        let location = self.cache.locate(version);
        let state = self.cache.state(&location);
        tracing::debug!("Template {} at {} is {}", version, location, state.label());

        if state == TemplateState::Valid {
            return Ok(());
        }

        self.cache.evict_if_corrupt(&location)?;

        let url = self.url_for(version);
        let fetched = self.downloader.download(&url, location.path()).and_then(|()| {
            match self.cache.state(&location) {
                TemplateState::Valid => Ok(()),
                state => Err(anyhow::anyhow!(
                    "template from {} is {} after download",
                    url,
                    state.label()
                )),
            }
        });

        fetched.map_err(|source| SproutError::FetchFailure {
            version: version.to_string(),
            source,
        })
    }
}
