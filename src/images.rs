use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Saved(PathBuf),
    /// The image could not be retrieved; nothing was written.
    Skipped,
}

/// Best-effort image downloader: a picture that cannot be retrieved never fails the run.
pub struct ImageFetcher {
    client: Client,
}

impl ImageFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// Download `url` to `path`, creating its parent directory first.
    ///
    /// Filesystem errors propagate; HTTP failures are logged and reported as `Skipped`.
    pub async fn fetch(&self, url: &str, path: &Path) -> Result<FetchOutcome> {
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Image request failed for {}: {}", url, e);
                return Ok(FetchOutcome::Skipped);
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Image {} returned {}", url, status);
            return Ok(FetchOutcome::Skipped);
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Image body could not be read from {}: {}", url, e);
                return Ok(FetchOutcome::Skipped);
            }
        };

        tokio::fs::write(path, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        debug!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(FetchOutcome::Saved(path.to_path_buf()))
    }
}
