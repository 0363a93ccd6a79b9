use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::{Arc, Mutex};
use tracing::{error, warn};

use crate::config::MaskConfig;
use crate::errors::{HttpError, HttpErrorExt};

/// Failure returned by handlers.
///
/// Anything convertible into `anyhow::Error` converts with `?`. Routes must be wrapped in
/// [`error_middleware`]: without it every failure, 4xx included, renders as the masked
/// 500 body and is logged at `error!` when the response is dropped.
#[derive(Debug)]
pub struct HandlerError(anyhow::Error);

impl HandlerError {
    pub fn http_error(&self) -> Option<&HttpError> {
        self.0.http_error()
    }

    pub fn into_inner(self) -> anyhow::Error {
        self.0
    }
}

impl<E> From<E> for HandlerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Carries the handler's failure from `into_response` to the middleware.
/// A failure nobody took is logged when the last clone drops.
#[derive(Clone)]
struct HandlerFailure(Arc<FailureSlot>);

struct FailureSlot {
    failure: Mutex<Option<anyhow::Error>>,
}

impl HandlerFailure {
    fn new(err: anyhow::Error) -> Self {
        Self(Arc::new(FailureSlot {
            failure: Mutex::new(Some(err)),
        }))
    }

    fn take(&self) -> Option<anyhow::Error> {
        let mut failure = self.0.failure.lock().ok()?;
        failure.take()
    }
}

impl Drop for FailureSlot {
    fn drop(&mut self) {
        let untaken = match self.failure.get_mut() {
            Ok(slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(err) = untaken {
            error!("Handler failure rendered without error_middleware: {:#}", err);
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let mut response = masked_response(&MaskConfig::default());
        response
            .extensions_mut()
            .insert(HandlerFailure::new(self.0));
        response
    }
}

/// Middleware turning handler failures into JSON error responses.
///
/// 4xx `HttpError`s are sent as-is with their own status. 5xx `HttpError`s and any
/// other failure are logged once and replaced by the masked 500 body.
pub async fn error_middleware(
    State(config): State<Arc<MaskConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;

    let Some(failure) = response
        .extensions_mut()
        .remove::<HandlerFailure>()
        .and_then(|stashed| stashed.take())
    else {
        return response;
    };

    match failure.http_error() {
        Some(http) if http.is_client_error() => {
            if config.log_client_errors {
                warn!(
                    method = %method,
                    path = %path,
                    status = http.status_code(),
                    "Request failed (client error): {:#}",
                    failure
                );
            }
            client_error_response(http)
        }
        _ => {
            error!(
                method = %method,
                path = %path,
                "Request failed (server error): {:#}",
                failure
            );
            masked_response(&config)
        }
    }
}

fn client_error_response(err: &HttpError) -> Response {
    (err.code().status(), Json(err)).into_response()
}

fn masked_response(config: &MaskConfig) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(config.masked_error())).into_response()
}
