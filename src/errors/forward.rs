//! Helpers for finding an [`HttpError`] inside wrapped failures.
//!
//! Wrapping and unwrapping are `anyhow`'s: attach context with [`Context`],
//! walk causes with [`std::error::Error::source`] or `anyhow::Error::chain`.

use std::error::Error as StdError;

pub use anyhow::{anyhow, bail, Context, Error, Result};

use super::http_error::HttpError;

/// Find the outermost `HttpError` in `err`'s source chain, `err` included
pub fn find_http_error<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a HttpError> {
    std::iter::successors(Some(err), |&e| e.source()).find_map(|e| e.downcast_ref::<HttpError>())
}

/// True when `err` carries an `HttpError` whose status is `status`.
/// `None`, foreign errors, and mismatched statuses are all false.
pub fn is_status(status: u16, err: Option<&(dyn StdError + 'static)>) -> bool {
    err.and_then(find_http_error)
        .is_some_and(|http| http.status_code() == status)
}

/// `HttpError` lookup on `anyhow::Error`
pub trait HttpErrorExt {
    fn http_error(&self) -> Option<&HttpError>;

    fn is_status(&self, status: u16) -> bool {
        self.http_error()
            .is_some_and(|http| http.status_code() == status)
    }
}

impl HttpErrorExt for anyhow::Error {
    fn http_error(&self) -> Option<&HttpError> {
        // downcast_ref also sees an HttpError attached as context
        let err: &(dyn StdError + 'static) = self.as_ref();
        self.downcast_ref::<HttpError>()
            .or_else(|| find_http_error(err))
    }
}
