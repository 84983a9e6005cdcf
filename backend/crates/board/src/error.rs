//! Board Error Types
//!
//! Board-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validation::Violations;
use thiserror::Error;

/// Board-specific result type alias
pub type BoardResult<T> = Result<T, BoardError>;

/// Board-specific error variants
#[derive(Debug, Error)]
pub enum BoardError {
    /// Request failed declarative validation
    #[error("{}", .0.first_message().unwrap_or("Request format is invalid."))]
    Validation(Violations),

    /// Post does not exist
    #[error("Post could not be found.")]
    PostNotFound,

    /// Comment does not exist (also returned when a post has no comments)
    #[error("Comment could not be found.")]
    CommentNotFound,

    /// Identity-owned resource mutated by a different identity
    ///
    /// Surfaced as 401 rather than the conventional 403; the historical
    /// API used 401 for every ownership failure and clients match on it.
    #[error("You are not the author of this resource.")]
    NotResourceOwner,

    /// Secret-owned resource mutated with a non-matching secret
    #[error("Password does not match.")]
    SecretMismatch,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BoardError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BoardError::Validation(_) => StatusCode::BAD_REQUEST,
            BoardError::PostNotFound | BoardError::CommentNotFound => StatusCode::NOT_FOUND,
            BoardError::NotResourceOwner | BoardError::SecretMismatch => {
                StatusCode::UNAUTHORIZED
            }
            BoardError::Database(_) | BoardError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BoardError::Validation(_) => ErrorKind::BadRequest,
            BoardError::PostNotFound | BoardError::CommentNotFound => ErrorKind::NotFound,
            BoardError::NotResourceOwner | BoardError::SecretMismatch => ErrorKind::Unauthorized,
            BoardError::Database(_) | BoardError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            BoardError::Database(e) => {
                tracing::error!(error = %e, "Board database error");
            }
            BoardError::Internal(msg) => {
                tracing::error!(message = %msg, "Board internal error");
            }
            BoardError::NotResourceOwner | BoardError::SecretMismatch => {
                tracing::warn!(error = %self, "Ownership check failed");
            }
            _ => {
                tracing::debug!(error = %self, "Board error");
            }
        }
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        self.log();

        // Server errors must not leak internals in the response body
        let message = if self.kind().is_server_error() {
            "Request could not be processed.".to_string()
        } else {
            self.to_string()
        };

        (
            self.status_code(),
            Json(serde_json::json!({ "message": message })),
        )
            .into_response()
    }
}

impl From<Violations> for BoardError {
    fn from(violations: Violations) -> Self {
        BoardError::Validation(violations)
    }
}

impl From<AppError> for BoardError {
    fn from(err: AppError) -> Self {
        BoardError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            BoardError::PostNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            BoardError::CommentNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        // Ownership failures are 401 on the wire
        assert_eq!(
            BoardError::NotResourceOwner.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            BoardError::SecretMismatch.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_validation_message() {
        let mut violations = Violations::new();
        violations.push("title", "Request format is invalid.");
        let err = BoardError::Validation(violations);
        assert_eq!(err.to_string(), "Request format is invalid.");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
