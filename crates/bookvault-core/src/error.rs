//! Domain-level error types.

use thiserror::Error;

/// Failures of the authentication and token-lifecycle operations.
///
/// The token service never swallows a collaborator error: it either passes
/// a [`RepoError`] through unchanged or translates it into one of the named
/// variants (a missing credential row becomes [`AuthError::UserNotFound`],
/// never a bare store error).
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("token signing failed: {0}")]
    Signing(String),

    /// Signature or expiry check failed.
    #[error("invalid token")]
    InvalidToken,

    /// The claim set could not be decoded into the expected shape.
    #[error("invalid claims")]
    InvalidClaims,

    /// The subject claim is missing or not an integer id.
    #[error("invalid subject")]
    InvalidSubject,

    /// No user matches the presented credentials. Deliberately covers both
    /// an unknown email and a wrong password.
    #[error("user not found")]
    UserNotFound,

    #[error("refresh token not found")]
    RefreshTokenNotFound,

    #[error("refresh token expired")]
    RefreshTokenExpired,

    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("database connection failed: {0}")]
    Connection(String),

    #[error("query execution failed: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("constraint violation: {0}")]
    Constraint(String),
}
