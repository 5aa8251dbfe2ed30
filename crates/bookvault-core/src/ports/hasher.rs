use crate::error::AuthError;

/// One-way, salted password hashing.
///
/// The digest must be deterministic for a given plaintext and configured
/// salt: the token service hashes identically on sign-up and sign-in and
/// verifies credentials by looking up `(email, digest)` rather than by a
/// dedicated compare call. A hashing failure is fatal to the operation
/// that triggered it.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AuthError>;
}
