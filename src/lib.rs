// Library exports for testing
pub mod api;
pub mod config;
pub mod errors;

pub use api::middleware::{error_middleware, HandlerError};
pub use config::MaskConfig;
pub use errors::{ErrorCode, HttpError};
