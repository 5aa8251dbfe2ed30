use async_trait::async_trait;

use crate::domain::RefreshSession;
use crate::error::RepoError;

/// Persistence contract for refresh sessions.
#[async_trait]
pub trait RefreshSessionStore: Send + Sync {
    /// Persist a freshly issued session.
    async fn create(&self, session: RefreshSession) -> Result<(), RepoError>;

    /// Look up a session by its opaque token value and consume it: a `Some`
    /// result has the side effect of deleting every session belonging to
    /// the returned user, keeping at most one live session per user.
    ///
    /// Implementations must make lookup-and-delete atomic (transaction or
    /// lock held across both steps) so that two concurrent redemptions of
    /// the same token cannot both succeed.
    async fn get(&self, token: &str) -> Result<Option<RefreshSession>, RepoError>;
}
