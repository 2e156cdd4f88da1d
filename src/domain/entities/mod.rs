//! Domain entity definitions.

mod file_name;
mod image_body;
mod resolved_link;

pub use file_name::FileName;
pub use image_body::{FetchedImage, ImageBody};
pub use resolved_link::ResolvedLink;
