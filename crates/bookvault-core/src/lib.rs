//! # BookVault Core
//!
//! The domain layer of the BookVault backend: user and refresh-session
//! models, the authentication error taxonomy, the capability ports that
//! infrastructure must implement, and the token service that orchestrates
//! them. This crate performs no I/O of its own.

pub mod auth;
pub mod domain;
pub mod error;
pub mod ports;

pub use auth::{TokenConfig, TokenPair, TokenService};
pub use error::{AuthError, RepoError};
