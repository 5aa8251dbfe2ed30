use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity - an account in the system.
///
/// `id` is assigned by the credential store on creation and immutable after
/// that. `password_hash` only ever holds the digest, never the plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub registered_at: DateTime<Utc>,
}

impl User {
    /// Build a not-yet-persisted user; the store assigns the real id.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: 0,
            name,
            email,
            password_hash,
            registered_at: Utc::now(),
        }
    }
}

/// Transient sign-up payload. Format and length validation happens at the
/// HTTP boundary before this reaches the token service.
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Transient sign-in payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SignInInput {
    pub email: String,
    pub password: String,
}
