use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::post,
};
use axum_helpers::errors::responses::{
    BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
    UnauthorizedResponse,
};
use axum_helpers::{JsonBody, TokenClaims, TokenService, require_admin};
use std::sync::Arc;
use tracing::instrument;

use crate::error::UserResult;
use crate::models::{LoginRequest, LoginResponse, MessageResponse, SetRoleRequest, SignupRequest};
use crate::repository::UserRepository;
use crate::service::UserService;

/// Users router state
pub type UsersState<R> = Arc<UserService<R>>;

/// Public account routes: `POST /signup`, `POST /login`
pub fn auth_router<R: UserRepository + 'static>() -> Router<UsersState<R>> {
    Router::new()
        .route("/signup", post(signup::<R>))
        .route("/login", post(login::<R>))
}

/// Admin-only routes: `POST /role`
pub fn admin_router<R: UserRepository + 'static>(tokens: TokenService) -> Router<UsersState<R>> {
    Router::new()
        .route("/role", post(set_role::<R>))
        .route_layer(middleware::from_fn_with_state(tokens, require_admin))
}

/// Create an account
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "auth"
)]
pub async fn signup<R: UserRepository>(
    State(service): State<UsersState<R>>,
    JsonBody(input): JsonBody<SignupRequest>,
) -> UserResult<impl IntoResponse> {
    let response = service.signup(input).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log in and receive a bearer token
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login<R: UserRepository>(
    State(service): State<UsersState<R>>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> UserResult<Json<LoginResponse>> {
    let response = service.login(input).await?;
    Ok(Json(response))
}

/// Grant or revoke admin rights (admin only)
#[utoipa::path(
    post,
    path = "/role",
    request_body = SetRoleRequest,
    responses(
        (status = 200, description = "Role updated or already in the requested state", body = MessageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
#[instrument(skip(service, claims, input), fields(admin_id = %claims.id))]
pub async fn set_role<R: UserRepository>(
    State(service): State<UsersState<R>>,
    Extension(claims): Extension<TokenClaims>,
    JsonBody(input): JsonBody<SetRoleRequest>,
) -> UserResult<Json<MessageResponse>> {
    let response = service.set_role(input).await?;
    Ok(Json(response))
}
