//! Requested image file name value object.

use std::fmt;

use crate::domain::errors::FileNameError;

/// Prefixes that mark a value as a path, URL or protocol rather than a bare name.
const PATH_LIKE_PREFIXES: [&str; 6] = ["http", "/", "ws", ".", "file:", "file"];

/// Accepted file extensions, compared case-insensitively.
const ACCEPTED_EXTENSIONS: [&str; 1] = [".png"];

/// A validated wiki image file name such as `Nightwraith.png`.
///
/// This is the key of both the link cache and the byte cache, and doubles as
/// the on-disk file name of a cached image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileName(String);

impl FileName {
    /// Validates a caller-supplied value.
    ///
    /// Checks run in a fixed order: presence, extension, then path-likeness.
    ///
    /// # Errors
    /// Returns the first rule the value breaks.
    pub fn parse(value: impl Into<String>) -> Result<Self, FileNameError> {
        let value = value.into();
        if value.is_empty() {
            return Err(FileNameError::Missing);
        }

        let lowered = value.to_lowercase();

        if !ACCEPTED_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext)) {
            return Err(FileNameError::UnsupportedFileType);
        }

        // Separators anywhere would let the name escape the cache directory.
        if PATH_LIKE_PREFIXES
            .iter()
            .any(|prefix| lowered.starts_with(prefix))
            || value.contains(['/', '\\'])
        {
            return Err(FileNameError::NotAFileName);
        }

        Ok(Self(value))
    }

    /// Validates an optional query value, treating absence like an empty value.
    ///
    /// # Errors
    /// Returns [`FileNameError::Missing`] for `None`, otherwise as [`Self::parse`].
    pub fn from_query(value: Option<String>) -> Result<Self, FileNameError> {
        value.map_or(Err(FileNameError::Missing), Self::parse)
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Nightwraith.png" ; "plain")]
    #[test_case("Titan.PNG" ; "uppercase_extension")]
    #[test_case("Some Boss (Legendary).png" ; "spaces_and_parens")]
    fn test_accepts_file_names(value: &str) {
        let name = FileName::parse(value).unwrap();
        assert_eq!(name.as_str(), value);
    }

    #[test_case("Nightwraith.jpg" ; "jpg")]
    #[test_case("Nightwraith" ; "no_extension")]
    #[test_case("Nightwraith.png.gif" ; "png_in_middle")]
    #[test_case("http://example.com/a.gif" ; "url_wrong_extension")]
    fn test_rejects_non_png(value: &str) {
        assert_eq!(
            FileName::parse(value),
            Err(FileNameError::UnsupportedFileType)
        );
    }

    #[test_case("http://example.com/a.png" ; "http_url")]
    #[test_case("HTTPS://example.com/a.png" ; "uppercase_https")]
    #[test_case("/etc/a.png" ; "absolute_path")]
    #[test_case("ws://host/a.png" ; "websocket")]
    #[test_case("../a.png" ; "relative_parent")]
    #[test_case(".png" ; "bare_extension")]
    #[test_case("file:///a.png" ; "file_url")]
    #[test_case("FileThing.png" ; "file_prefix")]
    #[test_case("images/a.png" ; "inner_separator")]
    #[test_case("images\\a.png" ; "inner_backslash")]
    fn test_rejects_path_like(value: &str) {
        assert_eq!(FileName::parse(value), Err(FileNameError::NotAFileName));
    }

    #[test]
    fn test_missing_values() {
        assert_eq!(FileName::parse(""), Err(FileNameError::Missing));
        assert_eq!(FileName::from_query(None), Err(FileNameError::Missing));
        assert_eq!(
            FileName::from_query(Some(String::new())),
            Err(FileNameError::Missing)
        );
    }

    #[test]
    fn test_extension_checked_before_prefix() {
        assert_eq!(
            FileName::parse("/etc/passwd"),
            Err(FileNameError::UnsupportedFileType)
        );
    }
}
