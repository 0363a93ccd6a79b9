//! HTTP error values and helpers for locating them in wrapped failures

pub mod codes;
pub mod forward;
pub mod http_error;

pub use codes::{ErrorCode, UnknownErrorCode};
pub use forward::{find_http_error, is_status, HttpErrorExt};
pub use http_error::HttpError;
