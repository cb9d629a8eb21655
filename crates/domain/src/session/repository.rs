use super::{Session, SessionId, SessionOverview};
use crate::DomainError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for Session persistence
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Create a session whose creation time and business date are both `now`
    async fn create(&self, now: DateTime<Utc>) -> Result<Session, DomainError>;

    async fn find_by_id(&self, id: SessionId) -> Result<Option<Session>, DomainError>;

    /// All sessions, most recent first, with their current scan counts
    async fn list_with_counts(&self) -> Result<Vec<SessionOverview>, DomainError>;

    /// Most recently created session whose business date is at or after `since`
    async fn find_latest_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Option<Session>, DomainError>;

    /// Sessions whose business date is at or after `since`, in any order
    async fn find_since(&self, since: DateTime<Utc>) -> Result<Vec<Session>, DomainError>;
}
