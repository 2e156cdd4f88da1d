//! Upstream wiki adapters.

pub mod html;
pub mod resolver;

pub use html::{CssSelector, ScraperQuery, SelectorError};
pub use resolver::{DEFAULT_IMAGE_SELECTOR, DEFAULT_PAGE_BASE_URL, WikiLinkResolver};
