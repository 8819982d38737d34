use super::shutdown::shutdown_signal;
use crate::errors::handlers::not_found;
use crate::http::cors_layer;
use axum::{Json, Router, http::StatusCode, routing::get};
use core_config::{Environment, server::ServerConfig};
use std::future::Future;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Where the generated OpenAPI document is served.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Upper bound on a single request, store round trips included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Starts the Axum server and waits for SIGINT/SIGTERM.
///
/// After in-flight requests drain, `cleanup` runs (closing the database pool
/// for example) before this returns.
///
/// # Errors
/// Returns an error if:
/// - The TCP listener fails to bind to the configured address
/// - The server encounters an error during operation
pub async fn create_app<F>(router: Router, server_config: &ServerConfig, cleanup: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send,
{
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!("Server starting on {}", listener.local_addr()?);
    let result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    info!("Server stopped, running cleanup");
    cleanup.await;
    result
}

/// Creates the application router with common middleware and documentation.
///
/// This function sets up:
/// - The OpenAPI document at [`OPENAPI_PATH`]
/// - The API routes, merged at the root
/// - Tracing, request timeout, CORS and compression layers
/// - A JSON 404 fallback
///
/// Health endpoints are added by the app with [`super::health_router`].
///
/// # Errors
/// Fails when the CORS configuration is rejected (see [`cors_layer`]).
pub fn create_router<T>(apis: Router, environment: &Environment) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors = cors_layer(environment)?;
    let openapi = T::openapi();

    let router = Router::new()
        .route(OPENAPI_PATH, get(move || async move { Json(openapi) }))
        .merge(apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .layer(cors)
        .layer(CompressionLayer::new());

    Ok(router)
}
