//! # BookVault Infrastructure
//!
//! Concrete implementations of the ports defined in `bookvault-core`: the
//! deterministic password hasher and the credential / refresh-session
//! stores.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory stores only
//! - `postgres` - PostgreSQL persistence via SeaORM

pub mod auth;
pub mod database;

pub use auth::SaltedSha256Hasher;
pub use database::{InMemoryCredentialStore, InMemorySessionStore};

#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConfig, PostgresCredentialStore, PostgresSessionStore, connect,
};
