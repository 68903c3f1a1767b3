//! Error codes shared by every API response.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! assert_eq!(ErrorCode::Forbidden.as_str(), "FORBIDDEN");
//! assert_eq!(ErrorCode::Forbidden.code(), 1007);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Field-level checks on the body failed
    ValidationError,
    /// Body is not the JSON shape the route expects
    JsonExtraction,
    NotFound,
    /// No usable bearer token
    Unauthorized,
    /// Token is valid but the role is wrong
    Forbidden,
    BadRequest,
    InternalError,
    /// Document store failed; 2xxx range
    DatabaseError,
}

impl ErrorCode {
    /// (identifier, numeric code, fallback message)
    const fn meta(self) -> (&'static str, i32, &'static str) {
        match self {
            Self::ValidationError => ("VALIDATION_ERROR", 1001, "Request validation failed"),
            Self::JsonExtraction => ("JSON_EXTRACTION", 1003, "Failed to parse request body"),
            Self::NotFound => ("NOT_FOUND", 1004, "Resource not found"),
            Self::InternalError => ("INTERNAL_ERROR", 1005, "Server error"),
            Self::Unauthorized => ("UNAUTHORIZED", 1006, "Not authorized"),
            Self::Forbidden => ("FORBIDDEN", 1007, "Admin access only"),
            Self::BadRequest => ("BAD_REQUEST", 1012, "Invalid request"),
            Self::DatabaseError => ("DATABASE_ERROR", 2003, "Database error occurred"),
        }
    }

    pub const fn as_str(self) -> &'static str {
        self.meta().0
    }

    pub const fn code(self) -> i32 {
        self.meta().1
    }

    pub const fn default_message(self) -> &'static str {
        self.meta().2
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
