//! File name validation error types.

use thiserror::Error;

/// Reasons a requested file name is refused before any upstream work starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum FileNameError {
    #[error("Missing path querystring.")]
    Missing,

    #[error("Recognised file type only: PNG")]
    UnsupportedFileType,

    #[error(
        "The path must be the file name, like this for example: 'Nightwraith.png' (excluding the quotation mark)"
    )]
    NotAFileName,
}
