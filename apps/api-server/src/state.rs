//! Application state - shared across all handlers.

use std::sync::Arc;

use chrono::TimeDelta;

use bookvault_core::ports::{CredentialStore, PasswordHasher, RefreshSessionStore};
use bookvault_core::{TokenConfig, TokenService};
use bookvault_infra::auth::SaltedSha256Hasher;
use bookvault_infra::database::{InMemoryCredentialStore, InMemorySessionStore};

#[cfg(feature = "postgres")]
use bookvault_infra::database::{PostgresCredentialStore, PostgresSessionStore, connect};

use crate::config::{AppConfig, AuthConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub auth_scheme: String,
    pub cookie_secure: bool,
    pub refresh_ttl_days: i64,
}

impl AppState {
    /// Build the application state with appropriate store implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let (users, sessions): (Arc<dyn CredentialStore>, Arc<dyn RefreshSessionStore>) = {
            if let Some(db_config) = &config.database {
                match connect(db_config).await {
                    Ok(conn) => (
                        Arc::new(PostgresCredentialStore::new(conn.clone())),
                        Arc::new(PostgresSessionStore::new(conn)),
                    ),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        Self::memory_stores()
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::memory_stores()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (users, sessions) = {
            tracing::info!("Running without postgres feature - using in-memory stores");
            Self::memory_stores()
        };

        let state = Self::with_stores(users, sessions, &config.auth);
        tracing::info!("Application state initialized");
        state
    }

    /// Wire the token service over explicit store implementations. Also the
    /// entry point for handler tests, which pass in-memory stores.
    pub fn with_stores(
        users: Arc<dyn CredentialStore>,
        sessions: Arc<dyn RefreshSessionStore>,
        auth: &AuthConfig,
    ) -> Self {
        let hasher: Arc<dyn PasswordHasher> =
            Arc::new(SaltedSha256Hasher::new(auth.password_salt.clone()));

        let tokens = TokenService::new(
            users,
            sessions,
            hasher,
            TokenConfig {
                secret: auth.jwt_secret.clone(),
                access_ttl: TimeDelta::minutes(auth.access_ttl_minutes),
                refresh_ttl: TimeDelta::days(auth.refresh_ttl_days),
            },
        );

        Self {
            tokens: Arc::new(tokens),
            auth_scheme: auth.auth_scheme.clone(),
            cookie_secure: auth.cookie_secure,
            refresh_ttl_days: auth.refresh_ttl_days,
        }
    }

    fn memory_stores() -> (Arc<dyn CredentialStore>, Arc<dyn RefreshSessionStore>) {
        (
            Arc::new(InMemoryCredentialStore::new()),
            Arc::new(InMemorySessionStore::new()),
        )
    }
}
