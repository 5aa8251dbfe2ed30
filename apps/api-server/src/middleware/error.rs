//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use bookvault_shared::ErrorResponse;
use std::fmt;

use bookvault_core::AuthError;
use bookvault_core::RepoError;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Unauthorized,
    Conflict(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail.clone()),
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::Conflict(detail) => {
                ErrorResponse::new(409, "Conflict").with_detail(detail.clone())
            }
            AppError::Internal(detail) => {
                // Log internal errors; the response body stays generic.
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

/// Map domain failures to HTTP classes. Credential failures stay generic:
/// the body never reveals whether the email or the password was wrong.
impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UserNotFound => AppError::BadRequest("invalid credentials".to_string()),
            AuthError::InvalidToken
            | AuthError::InvalidClaims
            | AuthError::InvalidSubject
            | AuthError::RefreshTokenNotFound
            | AuthError::RefreshTokenExpired => AppError::Unauthorized,
            AuthError::Repo(RepoError::Constraint(_)) => {
                AppError::Conflict("email already registered".to_string())
            }
            AuthError::Hashing(msg) | AuthError::Signing(msg) => AppError::Internal(msg),
            AuthError::Repo(e) => AppError::Internal(e.to_string()),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
