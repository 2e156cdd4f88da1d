//! Shared handler state.

use std::sync::Arc;

use crate::application::ImageUseCase;

/// State shared by all request handlers.
pub struct AppState {
    /// Pipeline answering `/image` requests.
    pub images: Arc<dyn ImageUseCase>,
}

impl AppState {
    /// Creates new state.
    #[must_use]
    pub fn new(images: Arc<dyn ImageUseCase>) -> Self {
        Self { images }
    }
}
