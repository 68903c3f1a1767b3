//! Event domain error types

use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Result type for event operations
pub type Result<T> = std::result::Result<T, EventError>;

#[derive(Debug, Error)]
pub enum EventError {
    /// Candidate failed one or more rules; messages in field order
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// The document store could not complete the operation
    #[error("Event store unavailable: {0}")]
    StoreUnavailable(String),

    /// A stored document could not be mapped back to an event
    #[error("Corrupt event document: {0}")]
    Corrupt(String),
}

impl From<mongodb::error::Error> for EventError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}

impl From<mongodb::bson::de::Error> for EventError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        Self::Corrupt(err.to_string())
    }
}

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::Validation(messages) => AppError::Validation(messages),
            EventError::StoreUnavailable(message) => AppError::Database(message),
            EventError::Corrupt(detail) => {
                tracing::error!(%detail, "Unreadable event document");
                AppError::InternalServerError("Server error".to_string())
            }
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
