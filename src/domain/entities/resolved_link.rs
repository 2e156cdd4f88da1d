//! Resolved upstream image link value object.

use std::fmt;

use url::Url;

/// Absolute URL of an image resource on the upstream host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedLink(Url);

impl ResolvedLink {
    /// Normalizes an `src` value taken from a description page.
    ///
    /// Protocol-relative values (`//host/a.png`) always become `https:`;
    /// other relative values are joined onto `page`.
    /// Returns `None` when no absolute http(s) URL can be formed.
    #[must_use]
    pub fn from_src(src: &str, page: &Url) -> Option<Self> {
        let src = src.trim();
        if src.is_empty() {
            return None;
        }

        let url = if src.starts_with("//") {
            Url::parse(&format!("https:{src}")).ok()?
        } else {
            page.join(src).ok()?
        };

        Self::from_url(url)
    }

    /// Parses an already absolute link, as stored in the link cache.
    #[must_use]
    pub fn parse(link: &str) -> Option<Self> {
        Url::parse(link).ok().and_then(Self::from_url)
    }

    fn from_url(url: Url) -> Option<Self> {
        matches!(url.scheme(), "http" | "https")
            .then_some(url)
            .filter(|url| url.host().is_some())
            .map(Self)
    }

    /// Returns the link as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the underlying URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for ResolvedLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("http://wiki.test/w/File:Nightwraith.png").unwrap()
    }

    #[test]
    fn test_protocol_relative_becomes_https() {
        let link = ResolvedLink::from_src("//cdn.example.com/a.png", &page()).unwrap();
        assert_eq!(link.as_str(), "https://cdn.example.com/a.png");
    }

    #[test]
    fn test_absolute_src_kept() {
        let link = ResolvedLink::from_src("http://cdn.example.com/a.png", &page()).unwrap();
        assert_eq!(link.as_str(), "http://cdn.example.com/a.png");
    }

    #[test]
    fn test_root_relative_joined_to_page() {
        let link = ResolvedLink::from_src("/images/a/ab/Nightwraith.png", &page()).unwrap();
        assert_eq!(link.as_str(), "http://wiki.test/images/a/ab/Nightwraith.png");
    }

    #[test]
    fn test_rejects_empty_and_foreign_schemes() {
        assert!(ResolvedLink::from_src("   ", &page()).is_none());
        assert!(ResolvedLink::from_src("data:image/png;base64,AAAA", &page()).is_none());
        assert!(ResolvedLink::parse("not a url").is_none());
        assert!(ResolvedLink::parse("ftp://host/a.png").is_none());
    }
}
