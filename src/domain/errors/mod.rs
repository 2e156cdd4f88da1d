//! Domain error types.

mod cache_error;
mod file_name_error;
mod image_error;

pub use cache_error::{CacheError, CacheResult};
pub use file_name_error::FileNameError;
pub use image_error::ImageError;
