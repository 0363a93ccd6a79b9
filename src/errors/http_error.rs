use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::codes::ErrorCode;
use crate::api::middleware::HandlerError;

/// An HTTP error: status code, optional symbolic name, and human message.
///
/// Serializes as `{"code": "<phrase>", "name": "<name>", "message": "<message>"}`,
/// with `name` omitted when unset.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, ToSchema)]
#[error("{}: {}", .code.phrase(), .message)]
pub struct HttpError {
    /// Canonical status phrase
    #[schema(value_type = String, example = "Not Found")]
    code: ErrorCode,
    /// Symbolic name for programmatic handling
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty"
    )]
    #[schema(example = "ERR_NOT_FOUND")]
    name: Option<String>,
    /// Human-readable error message
    message: String,
}

impl HttpError {
    /// Create an error without a name
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            name: None,
            message: message.into(),
        }
    }

    /// Create an error with a symbolic name. An empty name is treated as no name.
    pub fn named(code: ErrorCode, name: impl Into<String>, message: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            code,
            name: (!name.is_empty()).then_some(name),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The bare message, without the status phrase `Display` prepends
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Numeric HTTP status
    pub fn status_code(&self) -> u16 {
        self.code.as_u16()
    }

    pub fn is_client_error(&self) -> bool {
        self.code.is_client_error()
    }

    pub fn is_server_error(&self) -> bool {
        self.code.is_server_error()
    }
}

fn non_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name.filter(|name| !name.is_empty()))
}

/// Lets handlers return `Result<T, HttpError>`; rendering is left to
/// [`error_middleware`](crate::api::middleware::error_middleware).
impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        HandlerError::from(self).into_response()
    }
}
