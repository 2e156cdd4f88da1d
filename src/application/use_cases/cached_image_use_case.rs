//! Image serving with link and byte caches.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use super::ImageUseCase;
use crate::application::dto::{ImageRequest, ImageResponse, ImageSource};
use crate::domain::entities::{FileName, ImageBody, ResolvedLink};
use crate::domain::errors::ImageError;
use crate::domain::ports::{ByteCachePort, ImageDownloaderPort, LinkCachePort, LinkResolverPort};

/// Resolves, downloads and serves images, remembering links and bytes on disk.
///
/// Order of checks:
/// 1. redirect requested and link cached: redirect straight away
/// 2. bytes cached: serve them
/// 3. link cached: download, then serve
/// 4. otherwise resolve, record the link, then redirect or download and serve
pub struct CachedImageUseCase {
    resolver: Arc<dyn LinkResolverPort>,
    downloader: Arc<dyn ImageDownloaderPort>,
    links: Arc<dyn LinkCachePort>,
    bytes: Arc<dyn ByteCachePort>,
    attachment_name: String,
}

impl CachedImageUseCase {
    /// Creates new use case.
    #[must_use]
    pub fn new(
        resolver: Arc<dyn LinkResolverPort>,
        downloader: Arc<dyn ImageDownloaderPort>,
        links: Arc<dyn LinkCachePort>,
        bytes: Arc<dyn ByteCachePort>,
        attachment_name: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            downloader,
            links,
            bytes,
            attachment_name: attachment_name.into(),
        }
    }

    async fn open_cached(&self, name: &FileName) -> Result<Option<ImageBody>, ImageError> {
        self.bytes.open(name).await.map_err(|e| {
            error!(file = %name, error = %e, "Failed to read byte cache");
            ImageError::Pipeline
        })
    }

    async fn download_and_serve(
        &self,
        link: &ResolvedLink,
        name: &FileName,
    ) -> Result<ImageResponse, ImageError> {
        self.downloader.download(link, name).await?;

        let Some(body) = self.open_cached(name).await? else {
            error!(file = %name, "Downloaded image missing from byte cache");
            return Err(ImageError::Pipeline);
        };

        Ok(self.attachment(body, ImageSource::Upstream))
    }

    fn attachment(&self, body: ImageBody, source: ImageSource) -> ImageResponse {
        ImageResponse::Attachment {
            status: 200,
            file_name: self.attachment_name.clone(),
            body,
            source,
        }
    }
}

#[async_trait]
impl ImageUseCase for CachedImageUseCase {
    async fn execute(&self, request: ImageRequest) -> Result<ImageResponse, ImageError> {
        let ImageRequest {
            file_name: name,
            redirect,
        } = request;

        let cached_link = self.links.get(&name).await;

        if redirect && let Some(link) = &cached_link {
            debug!(file = %name, link = %link, "Redirecting to cached link");
            return Ok(ImageResponse::Redirect {
                link: link.clone(),
                source: ImageSource::LinkCache,
            });
        }

        if let Some(body) = self.open_cached(&name).await? {
            debug!(file = %name, "Serving image from byte cache");
            return Ok(self.attachment(body, ImageSource::ByteCache));
        }

        // Only reachable without redirect: a cached link with redirect returned above.
        if let Some(link) = cached_link {
            debug!(file = %name, link = %link, "Link cached, downloading image");
            return self.download_and_serve(&link, &name).await;
        }

        let link = self.resolver.resolve(&name).await?;
        info!(file = %name, link = %link, "Resolved image link");

        self.links
            .insert(name.clone(), link.clone())
            .await
            .map_err(|e| {
                error!(file = %name, error = %e, "Failed to persist link cache");
                ImageError::Pipeline
            })?;

        if redirect {
            return Ok(ImageResponse::Redirect {
                link,
                source: ImageSource::Upstream,
            });
        }

        self.download_and_serve(&link, &name).await
    }
}
