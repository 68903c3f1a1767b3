//! Circular API
//!
//! ```text
//! Client
//!   ↓ HTTP (bearer token on admin routes)
//! axum_helpers router: /api, /scalar, /health, CORS, tracing
//!   ↓
//! domain_events / domain_users services
//!   ↓
//! MongoDB (`events`, `users`)
//! ```

pub mod api;
pub mod config;
pub mod openapi;
pub mod state;

use axum::Router;
use axum_helpers::{create_router, health_router};

pub use config::Config;
pub use state::AppState;

/// Wrap `/api` routes with docs, middleware and the liveness endpoint.
pub fn app(api_routes: Router, config: &Config) -> std::io::Result<Router> {
    let router = create_router::<openapi::ApiDoc>(api_routes, &config.cors)?;
    Ok(router.merge(health_router(config.app)))
}
