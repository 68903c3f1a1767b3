//! API routes module
//!
//! Everything here is nested under `/api` by `axum_helpers::create_router`.

pub mod events;
pub mod health;
pub mod users;

use axum::Router;
use axum_helpers::TokenService;
use domain_events::{EventRepository, EventService, MongoEventRepository};
use domain_users::{MongoUserRepository, UserRepository, UserService};
use std::sync::Arc;

use crate::state::AppState;

/// MongoDB-backed routes plus the readiness probe
pub fn routes(state: &AppState) -> Router {
    let events = EventService::new(MongoEventRepository::new(&state.db));
    let users = UserService::new(
        MongoUserRepository::new(&state.db),
        state.tokens.clone(),
        state.config.promotion.clone(),
    );

    domain_routes(state.tokens.clone(), events, users).merge(health::router(state.mongo_client.clone()))
}

/// `/events`, `/auth` and `/admin` over any repositories.
pub fn domain_routes<E, U>(
    tokens: TokenService,
    events: EventService<E>,
    users: UserService<U>,
) -> Router
where
    E: EventRepository + 'static,
    U: UserRepository + 'static,
{
    let users = Arc::new(users);

    Router::new()
        .nest("/events", events::router(tokens.clone(), events))
        .nest("/auth", users::auth_router(users.clone()))
        .nest("/admin", users::admin_router(tokens, users))
}
