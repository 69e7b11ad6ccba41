//! HTTP template downloading.
//!
//! Fetches a template archive over HTTP/HTTPS and unpacks it into the
//! cache location.

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use std::path::Path;
use std::time::Duration;

use super::archive::unpack_template;
use super::Downloader;

/// Downloads template archives over HTTP/HTTPS.
pub struct HttpDownloader {
    client: Client,
    timeout: Duration,
}

impl HttpDownloader {
    /// Create a new downloader with the default 60-second timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(60))
    }

    /// Create a new downloader with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("sprout/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, timeout })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str, destination: &Path) -> Result<()> {
        tracing::info!("Downloading template from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP {} fetching {}", response.status(), url));
        }

        let body = response
            .bytes()
            .with_context(|| format!("Failed to read response from {}", url))?;

        unpack_template(body.as_ref(), destination)
            .with_context(|| format!("Failed to unpack template from {}", url))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_timeout() {
        let downloader = HttpDownloader::with_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(downloader.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn default_timeout_is_60_seconds() {
        let downloader = HttpDownloader::new().unwrap();
        assert_eq!(downloader.timeout(), Duration::from_secs(60));
    }
}
