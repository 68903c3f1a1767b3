/// Connector-level failures, independent of the driver in use.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Driver error from MongoDB
    #[cfg(feature = "mongodb")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Connection could not be established (after retries, if any)
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
