//! Authentication adapters.

mod password;

pub use password::SaltedSha256Hasher;
