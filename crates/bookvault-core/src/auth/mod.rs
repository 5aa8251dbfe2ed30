//! The authentication and token-lifecycle service.

mod service;

pub use service::{TokenConfig, TokenPair, TokenService};
