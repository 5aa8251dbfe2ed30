use async_trait::async_trait;

use crate::domain::User;
use crate::error::RepoError;

/// Persistence contract for user accounts.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a new user and return the stored row with its assigned id.
    /// A duplicate email surfaces as [`RepoError::Constraint`].
    async fn create_user(&self, user: User) -> Result<User, RepoError>;

    /// Find the user whose email and password digest both match. `None` is
    /// the distinguishable not-found signal; it covers a wrong password and
    /// an unknown email alike.
    async fn get_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>, RepoError>;
}
