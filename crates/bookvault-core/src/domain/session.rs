use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One outstanding refresh token.
///
/// Invariant: at most one live session per user. Issuing a new session
/// supersedes the previous one via the store's delete-on-lookup side
/// effect; a session is never updated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshSession {
    pub id: i64,
    pub user_id: i64,
    /// Opaque, cryptographically random token value (32 bytes, hex).
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl RefreshSession {
    pub fn new(user_id: i64, token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            user_id,
            token,
            expires_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}
