//! Events API routes

use axum::Router;
use axum_helpers::TokenService;
use domain_events::{EventRepository, EventService, MongoEventRepository};
use std::sync::Arc;
use tracing::info;

pub fn router<R: EventRepository + 'static>(tokens: TokenService, service: EventService<R>) -> Router {
    domain_events::events_router::<R>(tokens).with_state(Arc::new(service))
}

/// Initialize event indexes in MongoDB
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoEventRepository::new(db)
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create event indexes: {}", e))?;
    info!("Event collection indexes created");
    Ok(())
}
