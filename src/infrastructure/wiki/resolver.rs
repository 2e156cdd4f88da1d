//! Link resolution against a MediaWiki file description page.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};
use url::Url;

use crate::domain::entities::{FileName, ResolvedLink};
use crate::domain::errors::ImageError;
use crate::domain::ports::{HtmlQueryPort, LinkResolverPort};
use crate::infrastructure::http_client::UpstreamClient;

/// Default description page prefix; the file name is appended verbatim.
pub const DEFAULT_PAGE_BASE_URL: &str = "https://epicduelwiki.com/w/File:";

/// Default selector for the full-size image on a description page.
pub const DEFAULT_IMAGE_SELECTOR: &str = ".fullImageLink img";

/// Resolves image links by scraping the wiki's file description page.
pub struct WikiLinkResolver {
    http: UpstreamClient,
    page_base_url: String,
    html: Arc<dyn HtmlQueryPort>,
}

impl WikiLinkResolver {
    /// Creates new resolver.
    #[must_use]
    pub fn new(
        http: UpstreamClient,
        page_base_url: impl Into<String>,
        html: Arc<dyn HtmlQueryPort>,
    ) -> Self {
        Self {
            http,
            page_base_url: page_base_url.into(),
            html,
        }
    }

    fn page_url(&self, name: &FileName) -> Result<Url, url::ParseError> {
        Url::parse(&format!("{}{}", self.page_base_url, name))
    }
}

#[async_trait]
impl LinkResolverPort for WikiLinkResolver {
    async fn resolve(&self, name: &FileName) -> Result<ResolvedLink, ImageError> {
        let page = self.page_url(name).map_err(|e| {
            warn!(
                file = %name,
                base = %self.page_base_url,
                error = %e,
                "Invalid description page URL"
            );
            ImageError::SourcePage
        })?;

        debug!(file = %name, page = %page, "Fetching description page");

        let response = self.http.get(page.clone()).await.map_err(|e| {
            warn!(file = %name, error = %e, "Failed to fetch description page");
            ImageError::SourcePage
        })?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(file = %name, "Description page does not exist");
            return Err(ImageError::PageNotFound);
        }

        let html = response.text().await.map_err(|e| {
            warn!(file = %name, error = %e, "Failed to read description page");
            ImageError::SourcePage
        })?;

        let Some(src) = self.html.select_attribute(&html, "src") else {
            warn!(file = %name, "No image source found on description page");
            return Err(ImageError::SourcePage);
        };

        ResolvedLink::from_src(&src, &page).ok_or_else(|| {
            warn!(file = %name, src = %src, "Image source is not a usable link");
            ImageError::SourcePage
        })
    }
}
