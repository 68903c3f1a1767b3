use super::token::{TokenClaims, TokenService};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GuardError {
    /// No `Authorization: Bearer ...` header
    #[error("Not authorized")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    /// Valid token without the admin role
    #[error("Admin access only")]
    Forbidden,
}

impl From<GuardError> for AppError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::MissingToken | GuardError::InvalidToken => {
                AppError::Unauthorized(err.to_string())
            }
            GuardError::Forbidden => AppError::Forbidden(err.to_string()),
        }
    }
}

/// Decide whether an `Authorization` header value grants admin access.
pub fn authorize_admin(
    header: Option<&str>,
    tokens: &TokenService,
) -> Result<TokenClaims, GuardError> {
    let token = header
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(GuardError::MissingToken)?;

    let claims = tokens
        .verify(token.trim())
        .map_err(|_| GuardError::InvalidToken)?;

    if !claims.is_admin() {
        tracing::info!(user_id = %claims.id, role = %claims.role, "Non-admin caller rejected");
        return Err(GuardError::Forbidden);
    }

    Ok(claims)
}

/// Admin-only middleware.
///
/// Runs before the handler's body extractors, so a rejected request never
/// reaches validation or persistence. On success the [`TokenClaims`] are
/// available to handlers through `Extension<TokenClaims>`.
///
/// ```ignore
/// use axum::{Router, middleware, routing::post};
/// use axum_helpers::auth::require_admin;
///
/// let admin = Router::new()
///     .route("/role", post(set_role))
///     .route_layer(middleware::from_fn_with_state(tokens, require_admin));
/// ```
pub async fn require_admin(
    State(tokens): State<TokenService>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let claims = authorize_admin(header, &tokens)?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
