//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! The HTTP mapping mirrors the board's historical API: an unknown
//! nickname at login is 412, a wrong password is 400, and every
//! credential-resolution failure is 401 with its own message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validation::Violations;
use thiserror::Error;

use crate::domain::token::TokenError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Signup request failed declarative validation
    #[error("{}", .0.first_message().unwrap_or("Request format is invalid."))]
    Validation(Violations),

    /// Nickname already registered
    #[error("Nickname is already in use.")]
    NicknameTaken,

    /// Login with a nickname that has no matching identity
    #[error("Please check your nickname or password.")]
    UnknownNickname,

    /// Login with a password that does not match the stored hash
    #[error("Login failed.")]
    WrongPassword,

    /// No credential present in cookie or Authorization header
    #[error("Token is missing.")]
    MissingCredential,

    /// Credential scheme prefix is not "Bearer"
    #[error("Token type does not match.")]
    UnsupportedScheme,

    /// Token could not be parsed
    #[error("Token format is invalid.")]
    TokenMalformed,

    /// Token signature does not match
    #[error("Token has been tampered with.")]
    TokenTampered,

    /// Token validity window has elapsed
    #[error("Token has expired.")]
    TokenExpired,

    /// Token subject no longer exists (revocation check)
    #[error("User no longer exists.")]
    UnknownSubject,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::NicknameTaken => StatusCode::CONFLICT,
            AuthError::UnknownNickname => StatusCode::PRECONDITION_FAILED,
            AuthError::WrongPassword => StatusCode::BAD_REQUEST,
            AuthError::MissingCredential
            | AuthError::UnsupportedScheme
            | AuthError::TokenMalformed
            | AuthError::TokenTampered
            | AuthError::TokenExpired
            | AuthError::UnknownSubject => StatusCode::UNAUTHORIZED,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::WrongPassword => ErrorKind::BadRequest,
            AuthError::NicknameTaken => ErrorKind::Conflict,
            AuthError::UnknownNickname => ErrorKind::PreconditionFailed,
            AuthError::MissingCredential
            | AuthError::UnsupportedScheme
            | AuthError::TokenMalformed
            | AuthError::TokenTampered
            | AuthError::TokenExpired
            | AuthError::UnknownSubject => ErrorKind::Unauthorized,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Whether the client-held credential should be cleared
    ///
    /// True for every credential-resolution failure.
    pub fn clears_credential(&self) -> bool {
        matches!(
            self,
            AuthError::MissingCredential
                | AuthError::UnsupportedScheme
                | AuthError::TokenMalformed
                | AuthError::TokenTampered
                | AuthError::TokenExpired
                | AuthError::UnknownSubject
        )
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::UnknownNickname | AuthError::WrongPassword => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::TokenTampered => {
                tracing::warn!("Tampered token presented");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
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

impl From<Violations> for AuthError {
    fn from(violations: Violations) -> Self {
        AuthError::Validation(violations)
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed => AuthError::TokenMalformed,
            TokenError::InvalidSignature => AuthError::TokenTampered,
            TokenError::Expired => AuthError::TokenExpired,
        }
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
