//! Salted SHA-256 password hashing.

use sha2::{Digest, Sha256};

use bookvault_core::error::AuthError;
use bookvault_core::ports::PasswordHasher;

/// Deterministic salted hasher: digest = hex(SHA-256(salt || password)).
///
/// The credential lookup is by `(email, digest)`, so the digest has to be
/// reproducible for a given plaintext and configured salt. A per-hash
/// random salt (argon2/bcrypt style) would break that contract.
pub struct SaltedSha256Hasher {
    salt: String,
}

impl SaltedSha256Hasher {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }
}

impl PasswordHasher for SaltedSha256Hasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        hasher.update(password.as_bytes());

        Ok(hex::encode(hasher.finalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic_and_not_plaintext() {
        let hasher = SaltedSha256Hasher::new("pepper");

        let first = hasher.hash("secret1").unwrap();
        let second = hasher.hash("secret1").unwrap();

        assert_eq!(first, second);
        assert_ne!(first, "secret1");
    }

    #[test]
    fn digest_depends_on_salt() {
        let a = SaltedSha256Hasher::new("salt-a").hash("secret1").unwrap();
        let b = SaltedSha256Hasher::new("salt-b").hash("secret1").unwrap();

        assert_ne!(a, b);
    }
}
