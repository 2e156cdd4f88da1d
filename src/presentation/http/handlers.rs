//! `/image` endpoint.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tokio_util::io::ReaderStream;
use tracing::{debug, error, info, warn};

use super::error::ApiError;
use super::state::AppState;
use crate::application::{ImageRequest, ImageResponse};
use crate::domain::entities::ImageBody;
use crate::domain::errors::{FileNameError, ImageError};

const IMAGE_CONTENT_TYPE: &str = "image/png";

/// Recognised keys of the `GET /image` query string.
///
/// Repeated keys keep their first value and unknown keys are ignored.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImageQuery {
    /// Requested file name.
    pub path: Option<String>,
    /// `"true"` asks for a redirect instead of the bytes.
    pub redirect: Option<String>,
}

impl ImageQuery {
    /// Collects the recognised keys from decoded query pairs.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "path" => &mut query.path,
                "redirect" => &mut query.redirect,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

/// Handles `GET /image?path=<file name>&redirect=<true|false>`.
///
/// # Errors
/// Returns `400` with a JSON message for invalid input and any pipeline failure.
pub async fn get_image(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(pairs) = query.map_err(|e| {
        debug!(error = %e, "Unreadable query string");
        ApiError::from(FileNameError::Missing)
    })?;
    let query = ImageQuery::from_pairs(pairs);

    let request = ImageRequest::from_query(query.path, query.redirect.as_deref())
        .inspect_err(|e| debug!(error = %e, "Rejected image request"))?;
    let name = request.file_name.clone();

    let response = state.images.execute(request).await.map_err(|e| {
        if e.is_upstream() {
            warn!(file = %name, error = %e, "Upstream lookup failed");
        } else {
            error!(file = %name, error = %e, "Image request failed");
        }
        ApiError(e)
    })?;

    info!(file = %name, source = %response.source(), "Serving image");
    match response {
        ImageResponse::Redirect { link, .. } => redirect(link.as_str()),
        ImageResponse::Attachment {
            status,
            file_name,
            body,
            ..
        } => attachment(status, &file_name, body),
    }
}

fn redirect(location: &str) -> Result<Response, ApiError> {
    let location = HeaderValue::from_str(location).map_err(|e| {
        error!(location, error = %e, "Link is not a valid header value");
        ApiError(ImageError::Pipeline)
    })?;
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

fn attachment(status: u16, file_name: &str, body: ImageBody) -> Result<Response, ApiError> {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::OK);

    let disposition =
        HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\"")).map_err(|e| {
            error!(file_name, error = %e, "Attachment name is not a valid header value");
            ApiError(ImageError::Pipeline)
        })?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(IMAGE_CONTENT_TYPE));
    headers.insert(header::CONTENT_DISPOSITION, disposition);
    if let Some(len) = body.content_length() {
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    }

    let body = match body {
        ImageBody::Bytes(bytes) => Body::from(bytes),
        ImageBody::Reader { reader, .. } => Body::from_stream(ReaderStream::new(reader)),
    };

    Ok((status, headers, body).into_response())
}
