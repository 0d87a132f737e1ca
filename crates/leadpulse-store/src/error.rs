//! Store-specific error types

use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Record-store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Query failed: {0}")]
    Query(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Row decode failed: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::Connection(err.to_string())
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                Self::Decode(err.to_string())
            }
            other => Self::Query(other.to_string()),
        }
    }
}

// Convert to leadpulse_core AppError
impl From<StoreError> for leadpulse_core::AppError {
    fn from(err: StoreError) -> Self {
        leadpulse_core::AppError::store(err.to_string())
    }
}
