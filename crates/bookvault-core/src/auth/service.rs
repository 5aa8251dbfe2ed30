//! Token service - orchestrates sign-up, sign-in, token issuance,
//! validation, and refresh rotation over its three collaborators.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::domain::{RefreshSession, SignInInput, SignUpInput, User};
use crate::error::AuthError;
use crate::ports::{CredentialStore, PasswordHasher, RefreshSessionStore};

/// Token service configuration, injected at construction. Nothing here is
/// read from ambient globals.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub access_ttl: TimeDelta,
    pub refresh_ttl: TimeDelta,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            access_ttl: TimeDelta::minutes(15),
            refresh_ttl: TimeDelta::days(30),
        }
    }
}

/// An access/refresh token pair returned by sign-in and refresh.
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Short-lived HS256 JWT.
    pub access: String,
    /// Long-lived opaque token backed by a stored session.
    pub refresh: String,
}

/// Access token claim set. Fixed and strongly typed; anything that does not
/// decode into this shape is rejected at parse time.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(default)]
    sub: String,
    iat: i64,
    exp: i64,
}

/// Stateless orchestrator over the credential store, the refresh-session
/// store, and the password hasher. Holds no mutable state between calls, so
/// it is safe to share behind an `Arc` across request handlers.
pub struct TokenService {
    users: Arc<dyn CredentialStore>,
    sessions: Arc<dyn RefreshSessionStore>,
    hasher: Arc<dyn PasswordHasher>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: TokenConfig,
}

impl TokenService {
    pub fn new(
        users: Arc<dyn CredentialStore>,
        sessions: Arc<dyn RefreshSessionStore>,
        hasher: Arc<dyn PasswordHasher>,
        config: TokenConfig,
    ) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            users,
            sessions,
            hasher,
            encoding_key,
            decoding_key,
            config,
        }
    }

    /// Access-token lifetime in seconds, for `expires_in` response fields.
    pub fn access_ttl_seconds(&self) -> i64 {
        self.config.access_ttl.num_seconds()
    }

    /// Register a new user. The plaintext password is hashed before the
    /// user record is built; a duplicate email surfaces as a constraint
    /// violation from the store, not retried.
    pub async fn sign_up(&self, input: SignUpInput) -> Result<User, AuthError> {
        let digest = self.hasher.hash(&input.password)?;

        let user = User::new(input.name, input.email, digest);
        let user = self.users.create_user(user).await?;

        Ok(user)
    }

    /// Verify credentials and issue a token pair.
    ///
    /// Verification is hash-then-lookup by `(email, digest)`: a wrong
    /// password and an unknown email are indistinguishable to the caller,
    /// both yielding [`AuthError::UserNotFound`]. That is deliberate and
    /// must not be "fixed" into separate errors.
    pub async fn sign_in(&self, input: SignInInput) -> Result<TokenPair, AuthError> {
        let digest = self.hasher.hash(&input.password)?;

        let user = self
            .users
            .get_by_credentials(&input.email, &digest)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.generate_tokens(user.id).await
    }

    /// Issue a fresh access/refresh pair for `user_id` and persist the new
    /// refresh session. If persistence fails neither token reaches the
    /// caller, even though the access token was already signed in memory.
    pub async fn generate_tokens(&self, user_id: i64) -> Result<TokenPair, AuthError> {
        let now = Utc::now();

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.config.access_ttl).timestamp(),
        };

        let access = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        let refresh = new_refresh_token();

        let session =
            RefreshSession::new(user_id, refresh.clone(), now + self.config.refresh_ttl);
        self.sessions.create(session).await?;

        Ok(TokenPair { access, refresh })
    }

    /// Validate an access token and return the user id it asserts.
    ///
    /// Only HS256 is accepted; a token carrying any other algorithm fails
    /// the signature check (algorithm-confusion pinning). Purely
    /// cryptographic - never touches a store.
    pub fn parse_token(&self, token: &str) -> Result<i64, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::Json(_) => AuthError::InvalidClaims,
                _ => AuthError::InvalidToken,
            }
        })?;

        data.claims
            .sub
            .parse::<i64>()
            .map_err(|_| AuthError::InvalidSubject)
    }

    /// Redeem a refresh token for a new pair.
    ///
    /// The store lookup consumes the session (it deletes every session for
    /// the owning user), so a redeemed or expired token can never succeed
    /// on replay. Expiry is checked against the stored timestamp after the
    /// session has already been consumed.
    pub async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let session = self
            .sessions
            .get(refresh_token)
            .await?
            .ok_or(AuthError::RefreshTokenNotFound)?;

        if session.is_expired(Utc::now()) {
            return Err(AuthError::RefreshTokenExpired);
        }

        self.generate_tokens(session.user_id).await
    }
}

/// 32 bytes of OS randomness, hex-encoded.
fn new_refresh_token() -> String {
    let mut buf = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}
