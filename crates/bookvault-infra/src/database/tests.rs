#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use bookvault_core::ports::{CredentialStore, RefreshSessionStore};

    use crate::database::entity::{refresh_session, user};
    use crate::database::postgres::{PostgresCredentialStore, PostgresSessionStore};

    #[tokio::test]
    async fn get_by_credentials_maps_row_to_domain_user() {
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user::Model {
                id: 7,
                name: "Ann".to_owned(),
                email: "a@x.com".to_owned(),
                password_hash: "digest".to_owned(),
                registered_at: now.into(),
            }]])
            .into_connection();

        let store = PostgresCredentialStore::new(db);

        let user = store
            .get_by_credentials("a@x.com", "digest")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(user.id, 7);
        assert_eq!(user.email, "a@x.com");
    }

    #[tokio::test]
    async fn session_get_deletes_owner_sessions_in_same_transaction() {
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![refresh_session::Model {
                id: 1,
                user_id: 7,
                token: "abc".to_owned(),
                expires_at: now.into(),
            }]])
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let store = PostgresSessionStore::new(db);

        let session = store.get("abc").await.unwrap().unwrap();
        assert_eq!(session.user_id, 7);
        assert_eq!(session.token, "abc");
    }

    #[tokio::test]
    async fn session_get_misses_cleanly() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<refresh_session::Model>::new()])
            .into_connection();

        let store = PostgresSessionStore::new(db);

        assert!(store.get("missing").await.unwrap().is_none());
    }
}
