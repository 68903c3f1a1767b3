use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::{create_cors_layer, security_headers};
use axum::{Json, Router, middleware, routing::get};
use core_config::server::{CorsConfig, ServerConfig};
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, error, info, warn};
use utoipa::OpenApi;

/// Path of the generated OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Combine the API routes with documentation and cross-cutting middleware.
///
/// Sets up:
/// - `GET /scalar` (Scalar UI) and `GET /api-docs/openapi.json`
/// - the API routes nested under `/api`
/// - request tracing, security headers, CORS and response compression
/// - a JSON 404 fallback
///
/// Domain routers apply their own state before being passed in. Health
/// endpoints are merged by the caller with [`super::health_router`].
///
/// # Errors
/// Fails when `cors` lists an origin that is not a valid header value.
///
/// ```ignore
/// let api = Router::new().nest("/events", events_router).with_state(());
/// let router = create_router::<ApiDoc>(api, &CorsConfig::default())?;
/// ```
pub fn create_router<T>(apis: Router, cors: &CorsConfig) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    use utoipa_scalar::{Scalar, Servable};

    let cors_layer = create_cors_layer(cors)?;

    let router = Router::new()
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .route(OPENAPI_JSON_PATH, get(|| async { Json(T::openapi()) }))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Serve `router` with graceful shutdown and a bounded cleanup phase.
///
/// On SIGINT/SIGTERM the server stops accepting connections, drains in-flight
/// requests and runs `cleanup` (e.g. closing the MongoDB client) for at most
/// `shutdown_timeout`.
///
/// ```ignore
/// create_production_app(router, &config.server, Duration::from_secs(30), async move {
///     client.shutdown().await;
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::new();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!(address = %listener.local_addr()?, "Listening");

    let cleanup_handle = tokio::spawn({
        let coordinator = coordinator.clone();
        async move {
            coordinator.stopped().await;
            info!(timeout = ?shutdown_timeout, "Running cleanup");
            if tokio::time::timeout(shutdown_timeout, cleanup).await.is_err() {
                warn!(timeout = ?shutdown_timeout, "Cleanup timed out, exiting anyway");
            }
        }
    });

    let on_signal = coordinator.clone();
    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { on_signal.wait_for_signal().await })
        .await
        .inspect_err(|e| error!(error = %e, "Server stopped with an error"));

    // serve can also return without a signal; cleanup still has to run
    coordinator.shutdown();
    cleanup_handle.await.ok();

    serve_result
}
