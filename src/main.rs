use anyhow::{anyhow, Context, Result};
use axum::{extract::Path, middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{OpenApi, ToSchema};

use http_errors::config::Config;
use http_errors::{error_middleware, HandlerError, HttpError, MaskConfig};

#[derive(Debug, Serialize, ToSchema)]
struct Item {
    id: u32,
    name: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(get_item),
    components(schemas(Item, HttpError)),
    info(title = "http-errors demo")
)]
struct ApiDoc;

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/items/{id}",
    params(("id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 400, description = "ID is not a number", body = HttpError),
        (status = 404, description = "Item not found", body = HttpError),
        (status = 500, description = "Internal server error", body = HttpError)
    )
)]
async fn get_item(Path(id): Path<String>) -> Result<Json<Item>, HandlerError> {
    let id: u32 = id
        .parse()
        .map_err(|_| HttpError::bad_request_named("ERR_INVALID_ID", "item id must be a number"))?;

    match id {
        1 => Ok(Json(Item {
            id,
            name: "Sol Ring".to_string(),
        })),
        13 => Err(anyhow!("connection refused")
            .context(format!("loading item {id}"))
            .into()),
        _ => Err(HttpError::not_found_named(
            "ERR_ITEM_NOT_FOUND",
            format!("item {id} does not exist"),
        )
        .into()),
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn create_router(mask: MaskConfig) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/items/:id", get(get_item))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(middleware::from_fn_with_state(Arc::new(mask), error_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Resolves on Ctrl+C, or SIGTERM on unix
async fn shutdown_signal() {
    #[cfg(unix)]
    let sigterm = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!("SIGTERM handler unavailable: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        result = signal::ctrl_c() => match result {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(err) => warn!("Ctrl+C handler failed, shutting down: {}", err),
        },
        _ = sigterm => info!("Received SIGTERM, shutting down"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,http_errors=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting http-errors demo v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(masked_name = ?config.mask.name, "Configuration loaded successfully");

    let app = create_router(config.mask.clone());

    let addr = config.server_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind server")?;

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_shutdown_signal_waits_for_a_signal() {
        let waited = tokio::time::timeout(Duration::from_millis(50), shutdown_signal()).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn test_demo_router_renders_errors() {
        use axum::{body::Body, http::Request, http::StatusCode};
        use tower::Service;

        let mut app = create_router(MaskConfig::default());
        for (uri, expected) in [
            ("/items/1", StatusCode::OK),
            ("/items/abc", StatusCode::BAD_REQUEST),
            ("/items/7", StatusCode::NOT_FOUND),
            ("/items/13", StatusCode::INTERNAL_SERVER_ERROR),
        ] {
            let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
            let response = app.call(request).await.unwrap();
            assert_eq!(response.status(), expected, "{uri}");
        }
    }
}
