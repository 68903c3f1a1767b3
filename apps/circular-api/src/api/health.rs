//! Readiness endpoint

use axum::{Json, Router, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use mongodb::Client;
use serde_json::Value;

pub fn router(client: Client) -> Router {
    Router::new().route("/ready", get(move || readiness_check(client.clone())))
}

/// 200 when MongoDB answers a ping, 503 otherwise
async fn readiness_check(client: Client) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "mongodb",
        Box::pin(async move {
            let status = database::mongodb::check_health_detailed(&client).await;
            if status.healthy {
                Ok(())
            } else {
                Err(status.message.unwrap_or_else(|| "ping failed".to_string()))
            }
        }),
    )];

    run_health_checks(checks).await
}
