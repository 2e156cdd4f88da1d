//! wikimage - resolve, cache and serve images hosted on a wiki.
//!
//! A file name such as `Nightwraith.png` is looked up on the wiki's file
//! description page, and the caller is either redirected to the image or
//! handed its bytes. Resolved links and downloaded bytes are kept on disk so
//! repeated requests skip the lookup and the download.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing the HTTP interface.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "wikimage";
