//! Wiring and the listener loop.

use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tracing::{error, info};
use url::Url;

use super::router::create_router;
use super::state::AppState;
use crate::application::{CachedImageUseCase, ImageUseCase, PassthroughImageUseCase};
use crate::domain::errors::CacheError;
use crate::infrastructure::{
    AppConfig, CachingDownloader, CssSelector, DiskImageCache, HttpImageClient, JsonLinkCache,
    ScraperQuery, SelectorError, UpstreamClient, WikiLinkResolver,
};

/// Errors that prevent the server from starting.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum StartupError {
    #[error("invalid image selector: {0}")]
    Selector(#[from] SelectorError),

    #[error("invalid page base URL {url:?}: {source}")]
    PageBaseUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("cache unavailable: {0}")]
    Cache(#[from] CacheError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds the image pipeline described by `config`.
///
/// # Errors
/// Returns error if the upstream settings are invalid or the caches cannot be opened.
pub async fn build_use_case(config: &AppConfig) -> Result<Arc<dyn ImageUseCase>, StartupError> {
    let upstream = &config.upstream;
    Url::parse(&upstream.page_base_url).map_err(|source| StartupError::PageBaseUrl {
        url: upstream.page_base_url.clone(),
        source,
    })?;

    let selector = CssSelector::parse(&upstream.image_selector)?;
    let http = UpstreamClient::new(&upstream.user_agent, upstream.headers_timeout())?;
    let resolver = Arc::new(WikiLinkResolver::new(
        http.clone(),
        upstream.page_base_url.clone(),
        Arc::new(ScraperQuery::new(selector)),
    ));
    let client = HttpImageClient::new(http);

    if !config.cache.enabled {
        info!("Caching disabled, relaying every request upstream");
        return Ok(Arc::new(PassthroughImageUseCase::new(
            resolver,
            Arc::new(client),
            config.attachment.passthrough_name.clone(),
        )));
    }

    let bytes = Arc::new(DiskImageCache::new(config.cache.effective_dir()).await?);
    let links = Arc::new(JsonLinkCache::open(config.cache.effective_link_record())?);
    let downloader = Arc::new(CachingDownloader::new(client, Arc::clone(&bytes)));

    Ok(Arc::new(CachedImageUseCase::new(
        resolver,
        downloader,
        links,
        bytes,
        config.attachment.cached_name.clone(),
    )))
}

/// Builds the router for `config`.
///
/// # Errors
/// Returns error if the pipeline cannot be built.
pub async fn build_router(config: &AppConfig) -> Result<Router, StartupError> {
    let images = build_use_case(config).await?;
    Ok(create_router(Arc::new(AppState::new(images))))
}

/// Binds the configured address and serves until Ctrl-C.
///
/// # Errors
/// Returns error if startup fails or the listener cannot be bound.
pub async fn serve(config: &AppConfig) -> Result<(), StartupError> {
    let app = build_router(config).await?;

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!(address = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping server...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use test_case::test_case;

    fn config_in(dir: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.cache.dir = Some(dir.join("images"));
        config.cache.link_record = Some(dir.join("links.json"));
        config
    }

    #[tokio::test]
    async fn test_build_router_creates_cache_dir() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());

        build_router(&config).await.unwrap();

        assert!(dir.path().join("images").is_dir());
    }

    #[tokio::test]
    async fn test_passthrough_touches_no_disk() {
        let dir = tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.cache.enabled = false;

        build_router(&config).await.unwrap();

        assert!(!dir.path().join("images").exists());
    }

    #[test_case("   " ; "blank")]
    #[test_case(".fullImageLink img[" ; "malformed")]
    #[tokio::test]
    async fn test_invalid_selector_is_rejected(selector: &str) {
        let dir = tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.upstream.image_selector = selector.to_string();

        let result = build_router(&config).await;

        assert!(matches!(result, Err(StartupError::Selector(_))));
    }

    #[tokio::test]
    async fn test_invalid_base_url_is_rejected() {
        let dir = tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.upstream.page_base_url = "not a url".to_string();

        let result = build_router(&config).await;

        assert!(matches!(result, Err(StartupError::PageBaseUrl { .. })));
    }
}
