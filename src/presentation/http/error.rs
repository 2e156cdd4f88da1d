//! Error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::domain::errors::{FileNameError, ImageError};

/// Image pipeline failure rendered as `400 {"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(pub ImageError);

impl From<ImageError> for ApiError {
    fn from(err: ImageError) -> Self {
        Self(err)
    }
}

impl From<FileNameError> for ApiError {
    fn from(err: FileNameError) -> Self {
        Self(ImageError::from(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::header;

    #[tokio::test]
    async fn test_error_is_bad_request_with_json_message() {
        let response = ApiError(ImageError::PageNotFound).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "error": "Page doesn't exist." }));
    }

    #[test]
    fn test_validation_error_keeps_message() {
        let err = ApiError::from(FileNameError::Missing);

        assert_eq!(err.to_string(), "Missing path querystring.");
    }
}
