//! Store implementations.

mod memory;

#[cfg(feature = "postgres")]
mod connections;
#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres;

pub use memory::{InMemoryCredentialStore, InMemorySessionStore};

#[cfg(feature = "postgres")]
pub use connections::{DatabaseConfig, connect};
#[cfg(feature = "postgres")]
pub use postgres::{PostgresCredentialStore, PostgresSessionStore};

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
