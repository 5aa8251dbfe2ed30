//! PostgreSQL store implementations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, TransactionTrait,
};

use bookvault_core::domain::{RefreshSession, User};
use bookvault_core::error::RepoError;
use bookvault_core::ports::{CredentialStore, RefreshSessionStore};

use super::entity::refresh_session::{self, Entity as SessionEntity};
use super::entity::user::{self, Entity as UserEntity};

fn map_insert_err(e: sea_orm::DbErr) -> RepoError {
    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint(err_str)
    } else {
        RepoError::Query(err_str)
    }
}

/// PostgreSQL credential store.
pub struct PostgresCredentialStore {
    db: DbConn,
}

impl PostgresCredentialStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn create_user(&self, user: User) -> Result<User, RepoError> {
        let active: user::ActiveModel = user.into();
        let model = active.insert(&self.db).await.map_err(map_insert_err)?;

        Ok(model.into())
    }

    async fn get_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::PasswordHash.eq(password_hash))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

/// PostgreSQL refresh-session store.
pub struct PostgresSessionStore {
    db: DbConn,
}

impl PostgresSessionStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RefreshSessionStore for PostgresSessionStore {
    async fn create(&self, session: RefreshSession) -> Result<(), RepoError> {
        let active: refresh_session::ActiveModel = session.into();
        active.insert(&self.db).await.map_err(map_insert_err)?;

        Ok(())
    }

    /// Select and consume in one transaction, so two concurrent redemptions
    /// of the same token cannot both observe the session as live.
    async fn get(&self, token: &str) -> Result<Option<RefreshSession>, RepoError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        let found = SessionEntity::find()
            .filter(refresh_session::Column::Token.eq(token))
            .one(&txn)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if let Some(model) = &found {
            SessionEntity::delete_many()
                .filter(refresh_session::Column::UserId.eq(model.user_id))
                .exec(&txn)
                .await
                .map_err(|e| RepoError::Query(e.to_string()))?;
        }

        txn.commit()
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(found.map(Into::into))
    }
}
