//! Image handling infrastructure.
//!
//! This module provides:
//! - HTTP retrieval of resolved links
//! - Disk caching of downloaded bytes
//! - Streaming downloads from upstream into the disk cache

pub mod client;
pub mod disk_cache;
pub mod downloader;

pub use client::HttpImageClient;
pub use disk_cache::{DiskImageCache, StagedImage};
pub use downloader::CachingDownloader;
