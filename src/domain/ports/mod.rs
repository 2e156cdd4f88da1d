mod cache_port;
mod html_query_port;
mod image_fetch_port;
mod link_resolver_port;

pub use cache_port::{ByteCachePort, LinkCachePort};
pub use html_query_port::HtmlQueryPort;
pub use image_fetch_port::{ImageDownloaderPort, ImageFetcherPort};
pub use link_resolver_port::LinkResolverPort;

#[cfg(test)]
pub mod mocks {
    pub use super::cache_port::mock::{MockByteCache, MockLinkCache};
    pub use super::image_fetch_port::{MockImageDownloaderPort, MockImageFetcherPort};
    pub use super::link_resolver_port::MockLinkResolverPort;
}
