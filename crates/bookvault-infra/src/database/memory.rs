//! In-memory store implementations - used as fallback when the database is
//! not configured, and as substitutable fakes in tests.
//!
//! Note: all data is lost on process restart.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use bookvault_core::domain::{RefreshSession, User};
use bookvault_core::error::RepoError;
use bookvault_core::ports::{CredentialStore, RefreshSessionStore};

/// In-memory credential store over an async RwLock.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    rows: RwLock<Vec<User>>,
    next_id: AtomicI64,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create_user(&self, mut user: User) -> Result<User, RepoError> {
        let mut rows = self.rows.write().await;

        if rows.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint(format!(
                "email already registered: {}",
                user.email
            )));
        }

        user.id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        rows.push(user.clone());

        Ok(user)
    }

    async fn get_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>, RepoError> {
        let rows = self.rows.read().await;

        Ok(rows
            .iter()
            .find(|u| u.email == email && u.password_hash == password_hash)
            .cloned())
    }
}

/// In-memory refresh-session store.
///
/// `get` takes the write lock for the whole lookup-and-delete step, which
/// serializes redemption: of two concurrent calls with the same token,
/// exactly one sees the session.
#[derive(Default)]
pub struct InMemorySessionStore {
    rows: RwLock<Vec<RefreshSession>>,
    next_id: AtomicI64,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RefreshSessionStore for InMemorySessionStore {
    async fn create(&self, mut session: RefreshSession) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;

        if rows.iter().any(|s| s.token == session.token) {
            return Err(RepoError::Constraint("token already exists".to_string()));
        }

        session.id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        rows.push(session);

        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<RefreshSession>, RepoError> {
        let mut rows = self.rows.write().await;

        let found = rows.iter().find(|s| s.token == token).cloned();
        if let Some(session) = &found {
            rows.retain(|s| s.user_id != session.user_id);
        }

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};

    use super::*;

    fn session(user_id: i64, token: &str) -> RefreshSession {
        RefreshSession::new(user_id, token.to_string(), Utc::now() + TimeDelta::days(30))
    }

    #[tokio::test]
    async fn create_user_assigns_id_and_rejects_duplicate_email() {
        let store = InMemoryCredentialStore::new();
        let user = User::new("Ann".into(), "a@x.com".into(), "digest".into());

        let saved = store.create_user(user.clone()).await.unwrap();
        assert_eq!(saved.id, 1);

        let err = store.create_user(user).await.unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn credentials_must_match_both_fields() {
        let store = InMemoryCredentialStore::new();
        store
            .create_user(User::new("Ann".into(), "a@x.com".into(), "digest".into()))
            .await
            .unwrap();

        assert!(
            store
                .get_by_credentials("a@x.com", "digest")
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            store
                .get_by_credentials("a@x.com", "other")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn get_consumes_every_session_of_the_owner() {
        let store = InMemorySessionStore::new();
        store.create(session(1, "first")).await.unwrap();
        store.create(session(1, "second")).await.unwrap();

        let found = store.get("first").await.unwrap().unwrap();
        assert_eq!(found.user_id, 1);

        // Both of the user's sessions are gone after one lookup.
        assert!(store.get("first").await.unwrap().is_none());
        assert!(store.get("second").await.unwrap().is_none());
    }
}
