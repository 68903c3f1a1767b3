use axum_helpers::ErrorResponse;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, undecodable body
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error; `message` is safe to show as-is
    #[error("{message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// Build an [`ClientError::Api`] from a failed response body.
    ///
    /// Validation failures carry their messages in `details`; those are
    /// joined so the caller gets every problem in one string.
    pub(crate) fn from_body(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(ErrorResponse {
                details: Some(serde_json::Value::Array(details)),
                message,
                ..
            }) => {
                let joined: Vec<&str> = details.iter().filter_map(|d| d.as_str()).collect();
                if joined.is_empty() {
                    message
                } else {
                    joined.join(", ")
                }
            }
            Ok(response) => response.message,
            Err(_) if body.trim().is_empty() => format!("Request failed with status {status}"),
            Err(_) => body.trim().to_string(),
        };

        Self::Api { status, message }
    }

    /// HTTP status for server-side errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
        }
    }
}
