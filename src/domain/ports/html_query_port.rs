//! HTML querying port definition.

/// Port for reading one attribute out of an HTML document.
///
/// The selector is fixed when the implementation is built, so the contract at
/// call time is just "document and attribute in, value or not-found out".
pub trait HtmlQueryPort: Send + Sync {
    /// Returns `attribute` of the first element matching the bound selector.
    fn select_attribute(&self, html: &str, attribute: &str) -> Option<String>;
}
