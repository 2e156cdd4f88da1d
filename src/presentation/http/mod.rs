//! HTTP interface.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use router::create_router;
pub use server::{StartupError, build_router, build_use_case, serve};
pub use state::AppState;
