//! Error types for picshare.

use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // === Client Errors ===
    #[error("User not found: {0}")]
    UserNotFound(i32),

    #[error("Post not found: {0}")]
    PostNotFound(i32),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // === Server Errors ===
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::PostNotFound(_) => "POST_NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether this error originates on our side rather than the caller's.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Config(_) | Self::Internal(_)
        )
    }

    /// Log the error at a level matching its origin.
    pub fn log(&self) {
        let code = self.error_code();
        if self.is_server_error() {
            tracing::error!(error = %self, code = code, "Server error occurred");
        } else {
            tracing::debug!(error = %self, code = code, "Client error occurred");
        }
    }
}

// === From implementations ===

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::UserNotFound(1).error_code(), "USER_NOT_FOUND");
        assert_eq!(AppError::PostNotFound(7).error_code(), "POST_NOT_FOUND");
        assert_eq!(
            AppError::Conflict("dup".to_string()).error_code(),
            "CONFLICT"
        );
        assert_eq!(
            AppError::Database("boom".to_string()).error_code(),
            "DATABASE_ERROR"
        );
    }

    #[test]
    fn test_server_error_classification() {
        assert!(AppError::Database("x".to_string()).is_server_error());
        assert!(AppError::Config("x".to_string()).is_server_error());
        assert!(!AppError::BadRequest("x".to_string()).is_server_error());
        assert!(!AppError::UserNotFound(3).is_server_error());
    }

    #[test]
    fn test_display_keeps_driver_message() {
        let err = AppError::Database("UNIQUE constraint failed: user.email".to_string());
        assert_eq!(
            err.to_string(),
            "Database error: UNIQUE constraint failed: user.email"
        );
    }

    #[test]
    fn test_from_anyhow() {
        let err: AppError = anyhow::anyhow!("something broke").into();
        assert!(matches!(err, AppError::Internal(ref m) if m == "something broke"));
    }
}
