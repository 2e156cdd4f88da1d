//! Link resolution port definition.

use async_trait::async_trait;

use crate::domain::entities::{FileName, ResolvedLink};
use crate::domain::errors::ImageError;

/// Port for turning a file name into the upstream image link.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkResolverPort: Send + Sync {
    /// Looks up the direct image link for `name`.
    ///
    /// Fails with [`ImageError::PageNotFound`] when the description page does
    /// not exist and [`ImageError::SourcePage`] for any other failure.
    async fn resolve(&self, name: &FileName) -> Result<ResolvedLink, ImageError>;
}
