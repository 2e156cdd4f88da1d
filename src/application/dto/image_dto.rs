//! Image request and response DTOs.

use crate::domain::entities::{FileName, ImageBody, ResolvedLink};
use crate::domain::errors::FileNameError;

/// Where the served link or bytes came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Link cache hit.
    LinkCache,
    /// Byte cache hit.
    ByteCache,
    /// Freshly resolved or fetched from upstream.
    Upstream,
}

impl ImageSource {
    /// Returns a short label for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LinkCache => "link_cache",
            Self::ByteCache => "byte_cache",
            Self::Upstream => "upstream",
        }
    }
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated image request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    /// Requested file name.
    pub file_name: FileName,
    /// Whether the caller wants a redirect instead of the bytes.
    pub redirect: bool,
}

impl ImageRequest {
    /// Creates a request from an already validated name.
    #[must_use]
    pub const fn new(file_name: FileName, redirect: bool) -> Self {
        Self {
            file_name,
            redirect,
        }
    }

    /// Builds a request from raw query values.
    ///
    /// Only the literal `"true"` enables redirect mode.
    ///
    /// # Errors
    /// Returns the validation failure for `path`.
    pub fn from_query(
        path: Option<String>,
        redirect: Option<&str>,
    ) -> Result<Self, FileNameError> {
        let file_name = FileName::from_query(path)?;
        Ok(Self::new(file_name, redirect == Some("true")))
    }
}

/// Outcome of a successful image request.
#[derive(Debug)]
pub enum ImageResponse {
    /// Send the caller to the upstream link.
    Redirect {
        /// Target link.
        link: ResolvedLink,
        /// Where the link came from.
        source: ImageSource,
    },
    /// Return the image as an attachment.
    Attachment {
        /// HTTP status to answer with.
        status: u16,
        /// File name advertised in `Content-Disposition`.
        file_name: String,
        /// Image bytes.
        body: ImageBody,
        /// Where the bytes came from.
        source: ImageSource,
    },
}

impl ImageResponse {
    /// Returns where the response payload came from.
    #[must_use]
    pub const fn source(&self) -> ImageSource {
        match self {
            Self::Redirect { source, .. } | Self::Attachment { source, .. } => *source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_only_for_literal_true() {
        let name = || Some("Titan.png".to_string());

        assert!(ImageRequest::from_query(name(), Some("true")).unwrap().redirect);
        assert!(!ImageRequest::from_query(name(), Some("TRUE")).unwrap().redirect);
        assert!(!ImageRequest::from_query(name(), Some("1")).unwrap().redirect);
        assert!(!ImageRequest::from_query(name(), None).unwrap().redirect);
    }

    #[test]
    fn test_validation_error_surfaces() {
        let err = ImageRequest::from_query(None, Some("true")).unwrap_err();
        assert_eq!(err, FileNameError::Missing);
    }
}
