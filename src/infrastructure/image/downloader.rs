//! Streaming downloads into the byte cache.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use super::client::HttpImageClient;
use super::disk_cache::DiskImageCache;
use crate::domain::entities::{FileName, ResolvedLink};
use crate::domain::errors::ImageError;
use crate::domain::ports::ImageDownloaderPort;

/// Pipes upstream image bodies straight into [`DiskImageCache`] entries.
pub struct CachingDownloader {
    client: HttpImageClient,
    cache: Arc<DiskImageCache>,
}

impl CachingDownloader {
    /// Creates new downloader.
    #[must_use]
    pub const fn new(client: HttpImageClient, cache: Arc<DiskImageCache>) -> Self {
        Self { client, cache }
    }
}

#[async_trait]
impl ImageDownloaderPort for CachingDownloader {
    async fn download(&self, link: &ResolvedLink, name: &FileName) -> Result<(), ImageError> {
        let mut staged = self.cache.stage(name).await.map_err(|e| {
            error!(file = %name, error = %e, "Failed to stage download");
            ImageError::Download
        })?;

        // On error `staged` is dropped here, which discards the partial file.
        let size = self.client.stream_into(link, staged.writer()).await?;

        staged.commit().await.map_err(|e| {
            error!(file = %name, error = %e, "Failed to commit download");
            ImageError::Download
        })?;

        info!(file = %name, size, "Downloaded image into cache");
        Ok(())
    }
}
