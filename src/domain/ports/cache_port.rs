//! Port definitions for the link and byte caches.

use async_trait::async_trait;

use crate::domain::entities::{FileName, ImageBody, ResolvedLink};
use crate::domain::errors::CacheResult;

/// Port for the persisted file name to link mapping.
/// Implementations must be thread-safe.
#[async_trait]
pub trait LinkCachePort: Send + Sync {
    /// Returns the cached link for `name`, if any.
    async fn get(&self, name: &FileName) -> Option<ResolvedLink>;

    /// Records a link and persists the whole mapping.
    async fn insert(&self, name: FileName, link: ResolvedLink) -> CacheResult<()>;

    /// Returns the number of cached links.
    fn len(&self) -> usize;

    /// Returns true if no links are cached.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Port for reading downloaded image bytes.
/// Implementations must be thread-safe.
#[async_trait]
pub trait ByteCachePort: Send + Sync {
    /// Opens the cached bytes for `name`. Returns `Ok(None)` on a miss.
    async fn open(&self, name: &FileName) -> CacheResult<Option<ImageBody>>;
}
