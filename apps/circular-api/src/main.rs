use axum_helpers::server::{CleanupCoordinator, create_production_app};
use circular_api::{AppState, Config, api};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.redacted_url());
    let mongo_client = database::mongodb::connect_from_config_with_retry(
        &config.mongodb,
        Some(config.mongodb_retry.clone()),
    )
    .await?;
    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    let state = AppState::new(config, mongo_client);

    api::events::init_indexes(&state.db).await?;
    api::users::init_indexes(&state.db).await?;

    let app = circular_api::app(api::routes(&state), &state.config)?;

    info!("Starting Circular API with graceful shutdown (30s timeout)");

    let mut cleanup = CleanupCoordinator::new();
    let mongo_client = state.mongo_client.clone();
    cleanup.add_task("mongodb", async move {
        info!("Shutting down: closing MongoDB connections");
        mongo_client.shutdown().await;
        info!("MongoDB connection closed successfully");
    });

    create_production_app(app, &state.config.server, Duration::from_secs(30), cleanup.run())
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Circular API shutdown complete");
    Ok(())
}
