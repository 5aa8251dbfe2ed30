//! Application configuration loaded from environment variables.

use std::env;

#[cfg(feature = "postgres")]
use bookvault_infra::DatabaseConfig;

const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    pub auth: AuthConfig,
}

/// Authentication knobs. The header scheme and the cookie `Secure` flag are
/// deliberately configurable rather than hard-coded.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub password_salt: String,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_days: i64,
    pub auth_scheme: String,
    pub cookie_secure: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        #[cfg(feature = "postgres")]
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            #[cfg(feature = "postgres")]
            database,
            auth: AuthConfig::from_env(),
        }
    }
}

impl AuthConfig {
    pub fn from_env() -> Self {
        let jwt_secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string());

        if jwt_secret == DEFAULT_JWT_SECRET {
            let is_production = env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        Self {
            jwt_secret,
            password_salt: env::var("PASSWORD_SALT")
                .unwrap_or_else(|_| "bookvault-dev-salt".to_string()),
            access_ttl_minutes: env::var("ACCESS_TOKEN_TTL_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(15),
            refresh_ttl_days: env::var("REFRESH_TOKEN_TTL_DAYS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            auth_scheme: env::var("AUTH_SCHEME").unwrap_or_else(|_| "Bearer".to_string()),
            cookie_secure: env::var("COOKIE_SECURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }
}
