//! Domain layer with core value objects, errors, and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{FileName, ImageBody, ResolvedLink};
pub use errors::{CacheError, FileNameError, ImageError};
pub use ports::{
    ByteCachePort, HtmlQueryPort, ImageDownloaderPort, ImageFetcherPort, LinkCachePort,
    LinkResolverPort,
};
