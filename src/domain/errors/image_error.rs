//! Image pipeline error types.
//!
//! Every variant renders to the exact message returned to the HTTP caller, so
//! the `Display` output of this type is part of the public interface.

use thiserror::Error;

use super::FileNameError;

/// Failure kinds of the lookup, fetch and cache pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    /// The requested name did not pass validation.
    #[error(transparent)]
    InvalidFileName(#[from] FileNameError),

    /// Upstream answered 404 for the page or the image.
    #[error("Page doesn't exist.")]
    PageNotFound,

    /// Upstream answered with a status that is neither 2xx nor 404.
    #[error("Unexpected result was given from the server.")]
    UnexpectedResult,

    /// The description page could not be fetched, or had no usable image link.
    #[error("Errored trying to fetch/parse the image source's page.")]
    SourcePage,

    /// The image transfer into the byte cache failed.
    #[error("Errored trying to download the image.")]
    Download,

    /// Anything else that went wrong while serving the request.
    #[error("There has been a problem either downloading or fetching the image.")]
    Pipeline,
}

impl ImageError {
    /// Returns whether the error originates from the upstream wiki.
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::PageNotFound | Self::UnexpectedResult | Self::SourcePage | Self::Download
        )
    }
}
