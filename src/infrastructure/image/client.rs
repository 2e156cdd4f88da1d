//! HTTP retrieval of resolved image links.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::domain::entities::{FetchedImage, ResolvedLink};
use crate::domain::errors::ImageError;
use crate::domain::ports::ImageFetcherPort;
use crate::infrastructure::http_client::UpstreamClient;

/// Fetches image bytes from upstream, either into memory or into a writer.
#[derive(Debug, Clone)]
pub struct HttpImageClient {
    http: UpstreamClient,
}

impl HttpImageClient {
    /// Creates new client.
    #[must_use]
    pub const fn new(http: UpstreamClient) -> Self {
        Self { http }
    }

    /// Sends the request and applies the status policy:
    /// 404 is a missing page, any other non-2xx is unexpected.
    async fn request(&self, link: &ResolvedLink) -> Result<Response, ImageError> {
        let response = self.http.get(link.as_url().clone()).await.map_err(|e| {
            warn!(link = %link, error = %e, "Image request failed");
            ImageError::Download
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(link = %link, "Image does not exist upstream");
            return Err(ImageError::PageNotFound);
        }
        if !status.is_success() {
            warn!(link = %link, status = %status, "Unexpected image response status");
            return Err(ImageError::UnexpectedResult);
        }

        Ok(response)
    }

    /// Streams the image body into `writer` chunk by chunk.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    /// Returns the status policy error, or [`ImageError::Download`] when the
    /// transfer or a write fails midway.
    pub async fn stream_into<W>(
        &self,
        link: &ResolvedLink,
        writer: &mut W,
    ) -> Result<u64, ImageError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut response = self.request(link).await?;
        let mut written = 0u64;

        loop {
            let chunk = match response.chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(e) => return Err(transfer_failed(link, written, &e)),
            };
            if let Err(e) = writer.write_all(&chunk).await {
                return Err(transfer_failed(link, written, &e));
            }
            written += chunk.len() as u64;
        }

        if let Err(e) = writer.flush().await {
            return Err(transfer_failed(link, written, &e));
        }

        debug!(link = %link, size = written, "Image transfer complete");
        Ok(written)
    }
}

fn transfer_failed(link: &ResolvedLink, written: u64, error: &dyn std::fmt::Display) -> ImageError {
    warn!(link = %link, written, error = %error, "Image transfer failed");
    ImageError::Download
}

#[async_trait]
impl ImageFetcherPort for HttpImageClient {
    async fn fetch(&self, link: &ResolvedLink) -> Result<FetchedImage, ImageError> {
        let response = self.request(link).await?;
        let status = response.status().as_u16();

        let body = response.bytes().await.map_err(|e| {
            warn!(link = %link, error = %e, "Failed to read image body");
            ImageError::Download
        })?;

        Ok(FetchedImage { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn client() -> HttpImageClient {
        HttpImageClient::new(UpstreamClient::new("wikimage-test", Duration::from_secs(5)).unwrap())
    }

    fn link(server: &mockito::ServerGuard, path: &str) -> ResolvedLink {
        ResolvedLink::parse(&format!("{}{path}", server.url())).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_into_memory() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/a.png")
            .with_status(200)
            .with_body(b"png-bytes")
            .create_async()
            .await;

        let image = client().fetch(&link(&server, "/a.png")).await.unwrap();

        assert_eq!(image.status, 200);
        assert_eq!(&image.body[..], b"png-bytes");
    }

    #[tokio::test]
    async fn test_fetch_status_policy() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/gone.png")
            .with_status(404)
            .create_async()
            .await;
        server
            .mock("GET", "/teapot.png")
            .with_status(418)
            .create_async()
            .await;

        let client = client();

        assert_eq!(
            client.fetch(&link(&server, "/gone.png")).await.unwrap_err(),
            ImageError::PageNotFound
        );
        assert_eq!(
            client.fetch(&link(&server, "/teapot.png")).await.unwrap_err(),
            ImageError::UnexpectedResult
        );
    }

    #[tokio::test]
    async fn test_stream_into_writer() {
        let mut server = mockito::Server::new_async().await;
        let body = vec![7u8; 64 * 1024];
        server
            .mock("GET", "/big.png")
            .with_status(200)
            .with_body(&body)
            .create_async()
            .await;

        let mut sink = Vec::new();
        let written = client()
            .stream_into(&link(&server, "/big.png"), &mut sink)
            .await
            .unwrap();

        assert_eq!(written, body.len() as u64);
        assert_eq!(sink, body);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_download_error() {
        let link = ResolvedLink::parse("http://127.0.0.1:1/a.png").unwrap();

        let err = client().fetch(&link).await.unwrap_err();

        assert_eq!(err, ImageError::Download);
    }
}
