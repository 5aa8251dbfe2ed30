//! Ports - trait definitions for external dependencies.
//! These are the contracts that infrastructure must implement.

mod credentials;
mod hasher;
mod sessions;

pub use credentials::CredentialStore;
pub use hasher::PasswordHasher;
pub use sessions::RefreshSessionStore;
