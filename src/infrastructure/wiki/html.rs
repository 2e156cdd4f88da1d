//! CSS selector queries over wiki description pages.

use scraper::{Html, Selector};
use thiserror::Error;
use tracing::trace;

use crate::domain::ports::HtmlQueryPort;

/// Selector parse failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The selector has no parts.
    #[error("selector is empty")]
    Empty,
    /// The selector is not valid CSS.
    #[error("invalid selector '{selector}': {reason}")]
    Invalid {
        /// Selector text as configured.
        selector: String,
        /// Parser diagnostic.
        reason: String,
    },
}

/// A parsed CSS selector together with its source text.
#[derive(Debug, Clone)]
pub struct CssSelector {
    source: String,
    selector: Selector,
}

impl CssSelector {
    /// Parses a selector such as `.fullImageLink img`.
    ///
    /// # Errors
    /// Returns error for empty or malformed selectors.
    pub fn parse(selector: &str) -> Result<Self, SelectorError> {
        let source = selector.trim();
        if source.is_empty() {
            return Err(SelectorError::Empty);
        }

        let parsed = Selector::parse(source).map_err(|e| SelectorError::Invalid {
            selector: source.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            source: source.to_string(),
            selector: parsed,
        })
    }

    /// Returns the selector text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// [`HtmlQueryPort`] backed by `scraper` with a fixed selector.
#[derive(Debug, Clone)]
pub struct ScraperQuery {
    selector: CssSelector,
}

impl ScraperQuery {
    /// Creates a query bound to `selector`.
    #[must_use]
    pub const fn new(selector: CssSelector) -> Self {
        Self { selector }
    }
}

impl HtmlQueryPort for ScraperQuery {
    fn select_attribute(&self, html: &str, attribute: &str) -> Option<String> {
        let document = Html::parse_document(html);

        let Some(element) = document.select(&self.selector.selector).next() else {
            trace!(selector = self.selector.as_str(), "Selector matched nothing");
            return None;
        };

        element.value().attr(attribute).map(str::to_string)
    }
}
