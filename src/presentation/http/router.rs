//! Router construction.

use std::any::Any;
use std::sync::Arc;

use axum::Router;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use super::error::ApiError;
use super::handlers;
use super::state::AppState;
use crate::domain::errors::ImageError;

/// Creates the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/image", get(handlers::get_image))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Answers a panicked request with the generic pipeline error.
fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload");
    error!(panic = message, "Request handler panicked");

    ApiError(ImageError::Pipeline).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::{ImageRequest, ImageResponse, ImageUseCase};

    struct PanickingImages;

    #[async_trait]
    impl ImageUseCase for PanickingImages {
        async fn execute(&self, _request: ImageRequest) -> Result<ImageResponse, ImageError> {
            panic!("pipeline invariant broken");
        }
    }

    #[tokio::test]
    async fn test_panic_becomes_pipeline_error() {
        let router = create_router(Arc::new(AppState::new(Arc::new(PanickingImages))));

        let response = router
            .oneshot(
                Request::get("/image?path=Titan.png")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            value,
            json!({ "error": "There has been a problem either downloading or fetching the image." })
        );
    }

    #[test]
    fn test_owned_panic_message_is_accepted() {
        let response = panic_response(Box::new(String::from("owned message")));

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
