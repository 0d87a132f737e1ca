//! Application-wide error taxonomy

use thiserror::Error;

/// Result type alias for application operations
pub type AppResult<T> = std::result::Result<T, AppError>;

/// Application-level errors
///
/// Only `Authentication` aborts a dashboard request before computation;
/// everything else is either recovered (pagination truncation) or degraded
/// to zero/empty metrics at the assembler boundary.
#[derive(Error, Debug)]
pub enum AppError {
    /// Authentication failed (missing, malformed, or expired token)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Caller-supplied input is invalid (e.g. unordered date range)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record store failure before any data was fetched
    #[error("Store error: {0}")]
    Store(String),

    /// Unexpected failure during metric computation
    #[error("Computation error: {0}")]
    Computation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    pub fn computation(msg: impl Into<String>) -> Self {
        Self::Computation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Authentication(_) => 401,
            AppError::Validation(_) => 400,
            AppError::Store(_) => 500,
            AppError::Computation(_) => 500,
            AppError::Configuration(_) => 500,
            AppError::Internal(_) => 500,
        }
    }

    /// Get error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Authentication(_) => "AUTHENTICATION_FAILED",
            AppError::Validation(_) => "VALIDATION_FAILED",
            AppError::Store(_) => "STORE_ERROR",
            AppError::Computation(_) => "COMPUTATION_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_is_distinct_from_computation() {
        let auth = AppError::authentication("bad token");
        let comp = AppError::computation("rollup failed");
        assert_eq!(auth.status_code(), 401);
        assert_eq!(comp.status_code(), 500);
        assert_ne!(auth.error_code(), comp.error_code());
    }

    #[test]
    fn test_validation_is_client_error() {
        let err = AppError::validation("from must not exceed to");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
    }
}
