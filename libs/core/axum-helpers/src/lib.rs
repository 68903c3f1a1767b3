//! # Axum Helpers
//!
//! Shared building blocks for the Circular HTTP services.
//!
//! ## Modules
//!
//! - **[`auth`]**: session tokens and the admin guard middleware
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: structured error responses with error codes
//! - **[`extractors`]**: JSON body extractor using the error format
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{CleanupCoordinator, create_production_app, create_router};
//! use core_config::server::{CorsConfig, ServerConfig};
//! use std::time::Duration;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let router = create_router::<ApiDoc>(Router::new(), &CorsConfig::default())?;
//!     let cleanup = CleanupCoordinator::new();
//!     create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), cleanup.run())
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{
    GuardError, JwtConfig, TokenClaims, TokenError, TokenService, authorize_admin, require_admin,
};

pub use server::{
    CleanupCoordinator, HealthCheckFuture, HealthResponse, ShutdownCoordinator,
    create_production_app, create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, create_permissive_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::JsonBody;
