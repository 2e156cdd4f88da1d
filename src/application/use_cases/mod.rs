//! Use case implementations.

mod cached_image_use_case;
mod passthrough_image_use_case;

use async_trait::async_trait;

use crate::application::dto::{ImageRequest, ImageResponse};
use crate::domain::errors::ImageError;

pub use cached_image_use_case::CachedImageUseCase;
pub use passthrough_image_use_case::PassthroughImageUseCase;

/// Serves one validated image request.
#[async_trait]
pub trait ImageUseCase: Send + Sync {
    /// Runs the lookup, fetch and cache pipeline for `request`.
    ///
    /// # Errors
    /// Returns the caller-facing failure kind.
    async fn execute(&self, request: ImageRequest) -> Result<ImageResponse, ImageError>;
}
