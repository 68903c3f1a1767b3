use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, TokenError};
use thiserror::Error;

/// Result type for account operations
pub type UserResult<T> = Result<T, UserError>;

/// Display strings double as the client-facing messages for 4xx variants.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("All fields required")]
    MissingFields,

    #[error("User already exists")]
    DuplicateEmail,

    /// Unknown email and wrong password are indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid request")]
    InvalidRequest,

    #[error("User not found")]
    UserNotFound,

    #[error("User store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Corrupt user document: {0}")]
    Corrupt(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::MissingFields
            | UserError::DuplicateEmail
            | UserError::InvalidCredentials
            | UserError::InvalidRequest => AppError::BadRequest(err.to_string()),
            UserError::UserNotFound => AppError::NotFound(err.to_string()),
            UserError::StoreUnavailable(detail) => AppError::Database(detail),
            UserError::Corrupt(_) | UserError::PasswordHash(_) | UserError::Token(_) => {
                tracing::error!(error = %err, "Account operation failed");
                AppError::InternalServerError("Server error".to_string())
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_client_errors_keep_their_message() {
        let cases = [
            (UserError::MissingFields, StatusCode::BAD_REQUEST, "All fields required"),
            (UserError::DuplicateEmail, StatusCode::BAD_REQUEST, "User already exists"),
            (UserError::InvalidCredentials, StatusCode::BAD_REQUEST, "Invalid credentials"),
            (UserError::InvalidRequest, StatusCode::BAD_REQUEST, "Invalid request"),
            (UserError::UserNotFound, StatusCode::NOT_FOUND, "User not found"),
        ];

        for (err, status, message) in cases {
            let app_err = AppError::from(err);
            assert_eq!(app_err.status(), status);
            assert!(app_err.to_string().ends_with(message));
        }
    }

    #[test]
    fn test_server_errors_are_500() {
        let err = AppError::from(UserError::PasswordHash("salt".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = AppError::from(UserError::StoreUnavailable("timeout".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
