//! Auth and admin API routes

use axum::Router;
use axum_helpers::TokenService;
use domain_users::{MongoUserRepository, UserRepository, UsersState};
use tracing::info;

pub fn auth_router<R: UserRepository + 'static>(service: UsersState<R>) -> Router {
    domain_users::auth_router::<R>().with_state(service)
}

pub fn admin_router<R: UserRepository + 'static>(
    tokens: TokenService,
    service: UsersState<R>,
) -> Router {
    domain_users::admin_router::<R>(tokens).with_state(service)
}

/// Unique email index; must exist before the first signup
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoUserRepository::new(db)
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create user indexes: {}", e))?;
    info!("User collection indexes created");
    Ok(())
}
