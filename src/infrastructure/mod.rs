//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Outbound HTTP client.
pub mod http_client;
/// Image download and the on-disk byte cache.
pub mod image;
/// Persisted link cache.
pub mod link_cache;
/// Wiki page lookup.
pub mod wiki;

pub use config::{AppConfig, CliArgs, ConfigError, ConfigStore, LogLevel};
pub use http_client::{UpstreamClient, UpstreamError};
pub use image::{CachingDownloader, DiskImageCache, HttpImageClient, StagedImage};
pub use link_cache::JsonLinkCache;
pub use wiki::{CssSelector, ScraperQuery, SelectorError, WikiLinkResolver};
