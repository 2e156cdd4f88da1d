//! Image serving without any local cache.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::ImageUseCase;
use crate::application::dto::{ImageRequest, ImageResponse, ImageSource};
use crate::domain::entities::ImageBody;
use crate::domain::errors::ImageError;
use crate::domain::ports::{ImageFetcherPort, LinkResolverPort};

/// Resolves every request upstream and relays the bytes from memory.
pub struct PassthroughImageUseCase {
    resolver: Arc<dyn LinkResolverPort>,
    fetcher: Arc<dyn ImageFetcherPort>,
    attachment_name: String,
}

impl PassthroughImageUseCase {
    /// Creates new use case.
    #[must_use]
    pub fn new(
        resolver: Arc<dyn LinkResolverPort>,
        fetcher: Arc<dyn ImageFetcherPort>,
        attachment_name: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            fetcher,
            attachment_name: attachment_name.into(),
        }
    }
}

#[async_trait]
impl ImageUseCase for PassthroughImageUseCase {
    async fn execute(&self, request: ImageRequest) -> Result<ImageResponse, ImageError> {
        let link = self.resolver.resolve(&request.file_name).await?;

        if request.redirect {
            return Ok(ImageResponse::Redirect {
                link,
                source: ImageSource::Upstream,
            });
        }

        let image = self.fetcher.fetch(&link).await?;
        debug!(
            file = %request.file_name,
            status = image.status,
            size = image.body.len(),
            "Relaying image"
        );

        Ok(ImageResponse::Attachment {
            status: image.status,
            file_name: self.attachment_name.clone(),
            body: ImageBody::Bytes(image.body),
            source: ImageSource::Upstream,
        })
    }
}
