//! Users Domain
//!
//! Accounts for the Circular API:
//! - signup with Argon2 password hashing and allow-list promotion
//! - login issuing 7-day bearer tokens
//! - admin-only grant/revoke of the admin role
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /auth/signup, /auth/login, /admin/role
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← hashing, tokens, role rules
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← MongoDB or in-memory
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtConfig, TokenService};
//! use domain_users::{InMemoryUserRepository, PromotionPolicy, UserService, auth_router};
//! use std::sync::Arc;
//!
//! let tokens = TokenService::new(&JwtConfig::new("a-secret-of-at-least-32-characters!!").unwrap());
//! let service = UserService::new(InMemoryUserRepository::new(), tokens, PromotionPolicy::default());
//!
//! let router: axum::Router = auth_router::<InMemoryUserRepository>().with_state(Arc::new(service));
//! ```

use utoipa::OpenApi;

pub mod error;
pub mod handlers;
pub mod models;
mod mongodb;
pub mod policy;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::{UsersState, admin_router, auth_router};
pub use models::{
    LoginRequest, LoginResponse, MessageResponse, Role, RoleAction, SetRoleRequest, SignupRequest,
    User,
};
pub use self::mongodb::{MongoUserRepository, USERS_COLLECTION};
pub use policy::PromotionPolicy;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;

/// OpenAPI documentation for `/api/auth`
#[derive(OpenApi)]
#[openapi(
    paths(handlers::signup, handlers::login),
    components(schemas(SignupRequest, LoginRequest, LoginResponse, MessageResponse, Role)),
    tags(
        (name = "auth", description = "Signup and login")
    )
)]
pub struct AuthApiDoc;

/// OpenAPI documentation for `/api/admin`
#[derive(OpenApi)]
#[openapi(
    paths(handlers::set_role),
    components(schemas(SetRoleRequest, RoleAction, MessageResponse)),
    tags(
        (name = "admin", description = "Role management")
    )
)]
pub struct AdminApiDoc;
