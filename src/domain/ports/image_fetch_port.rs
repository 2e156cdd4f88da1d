//! Image retrieval port definitions.

use async_trait::async_trait;

use crate::domain::entities::{FetchedImage, FileName, ResolvedLink};
use crate::domain::errors::ImageError;

/// Port for fetching an image fully into memory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageFetcherPort: Send + Sync {
    /// Fetches the bytes behind `link`.
    async fn fetch(&self, link: &ResolvedLink) -> Result<FetchedImage, ImageError>;
}

/// Port for downloading an image straight into the byte cache.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageDownloaderPort: Send + Sync {
    /// Streams the bytes behind `link` into the cache entry for `name`.
    ///
    /// The entry only becomes visible once the transfer has completed.
    async fn download(&self, link: &ResolvedLink, name: &FileName) -> Result<(), ImageError>;
}
