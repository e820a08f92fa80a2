// src/error.rs
//! Error taxonomy shared by the store, the match engine and the HTTP layer

use rocket::http::Status;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn status(&self) -> Status {
        match self {
            AppError::Unauthorized(_) => Status::Unauthorized,
            AppError::NotFound(_) => Status::NotFound,
            AppError::Validation(_) => Status::BadRequest,
            AppError::Conflict(_) => Status::Conflict,
            AppError::Storage(_) | AppError::Internal(_) => Status::InternalServerError,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Storage(_) | AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to hand back to the caller. Collaborator failures stay opaque.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Storage(_) | AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self, AppError::Storage(_) | AppError::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::validation("x").status(), Status::BadRequest);
        assert_eq!(AppError::not_found("x").status(), Status::NotFound);
        assert_eq!(
            AppError::Unauthorized("x".to_string()).status(),
            Status::Unauthorized
        );
        assert_eq!(AppError::Conflict("x".to_string()).status(), Status::Conflict);
    }

    #[test]
    fn test_internal_errors_do_not_leak() {
        let err = AppError::Internal(anyhow::anyhow!("disk /var/lib/secret is full"));
        assert_eq!(err.public_message(), "Internal server error");
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert!(err.is_server_error());

        let err = AppError::validation("Job Title is required");
        assert_eq!(err.public_message(), "Job Title is required");
        assert!(!err.is_server_error());
    }
}
