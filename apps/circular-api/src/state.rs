//! Shared application state.

use axum_helpers::TokenService;
use mongodb::{Client, Database};

/// Built once in `main` and handed to the route builders.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Client,
    /// Database holding the `users` and `events` collections
    pub db: Database,
    /// Signs and verifies bearer tokens with the configured secret
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(config: crate::config::Config, mongo_client: Client) -> Self {
        let db = mongo_client.database(config.mongodb.database());
        let tokens = TokenService::new(&config.jwt);

        Self {
            config,
            mongo_client,
            db,
            tokens,
        }
    }
}
