//! Image payload types handed from the pipeline to the HTTP layer.

use std::fmt;
use std::pin::Pin;

use bytes::Bytes;
use tokio::io::AsyncRead;

/// Image bytes, either already in memory or readable from a cache entry.
pub enum ImageBody {
    /// Bytes fetched straight from upstream.
    Bytes(Bytes),
    /// A reader over a byte cache entry.
    Reader {
        /// Source of the bytes.
        reader: Pin<Box<dyn AsyncRead + Send>>,
        /// Total length, when known.
        len: Option<u64>,
    },
}

impl ImageBody {
    /// Returns the body length if it is known up front.
    #[must_use]
    pub fn content_length(&self) -> Option<u64> {
        match self {
            Self::Bytes(bytes) => Some(bytes.len() as u64),
            Self::Reader { len, .. } => *len,
        }
    }
}

impl fmt::Debug for ImageBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Self::Reader { len, .. } => f.debug_struct("Reader").field("len", len).finish(),
        }
    }
}

/// Image fetched into memory, with the upstream status code.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    /// Upstream HTTP status, always in the 2xx range.
    pub status: u16,
    /// Raw image bytes.
    pub body: Bytes,
}
