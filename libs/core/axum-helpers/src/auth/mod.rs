//! Session tokens and the admin guard.
//!
//! ```ignore
//! use axum_helpers::auth::{JwtConfig, TokenService, require_admin};
//! use core_config::FromEnv;
//!
//! let tokens = TokenService::new(&JwtConfig::from_env()?);
//!
//! let admin_routes = Router::new()
//!     .route("/api/admin/role", post(handler))
//!     .route_layer(axum::middleware::from_fn_with_state(tokens, require_admin));
//! ```

pub mod config;
pub mod guard;
pub mod token;

pub use config::JwtConfig;
pub use guard::{GuardError, authorize_admin, require_admin};
pub use token::{ADMIN_ROLE, TOKEN_TTL_SECS, TokenClaims, TokenError, TokenService};
