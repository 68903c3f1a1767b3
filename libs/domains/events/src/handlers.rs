//! HTTP handlers for the events API

use crate::error::EventError;
use crate::models::{CreateEvent, Event};
use crate::repository::EventRepository;
use crate::service::EventService;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router, middleware};
use axum_helpers::errors::responses::{
    BadRequestValidationResponse, ForbiddenResponse, InternalServerErrorResponse,
    UnauthorizedResponse,
};
use axum_helpers::{JsonBody, TokenClaims, TokenService, require_admin};
use std::sync::Arc;
use tracing::instrument;

/// Events router state
pub type EventsState<R> = Arc<EventService<R>>;

/// `GET /` is public; `POST /` requires an admin bearer token.
pub fn events_router<R: EventRepository + 'static>(
    tokens: TokenService,
) -> Router<EventsState<R>> {
    Router::new().route(
        "/",
        get(list_events::<R>).merge(
            post(create_event::<R>)
                .route_layer(middleware::from_fn_with_state(tokens, require_admin)),
        ),
    )
}

/// List all events, newest first
#[utoipa::path(
    get,
    path = "",
    responses(
        (status = 200, description = "All events, newest first", body = Vec<Event>),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state))]
pub async fn list_events<R: EventRepository>(
    State(state): State<EventsState<R>>,
) -> Result<Json<Vec<Event>>, EventError> {
    let events = state.list().await?;
    Ok(Json(events))
}

/// Publish a new event (admin only)
#[utoipa::path(
    post,
    path = "",
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "events"
)]
#[instrument(skip(state, claims, candidate), fields(admin_id = %claims.id))]
pub async fn create_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    Extension(claims): Extension<TokenClaims>,
    JsonBody(candidate): JsonBody<CreateEvent>,
) -> Result<impl IntoResponse, EventError> {
    let event = state.create(candidate).await?;
    Ok((StatusCode::CREATED, Json(event)))
}
