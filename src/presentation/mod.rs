//! Presentation layer exposing the image pipeline over HTTP.

/// HTTP routes, handlers and server lifecycle.
pub mod http;

pub use http::{StartupError, build_router, serve};
