use super::{DeviceId, NewScan, ScanFilter, ScanListing, ScanRecord};
use crate::DomainError;
use crate::session::SessionId;
use async_trait::async_trait;

/// Repository interface for scan record persistence
///
/// Implementations must enforce uniqueness of `(device_id, session_id)`
/// in storage and report a violation as `DomainError::DuplicateScan`.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait ScanRepository: Send + Sync {
    /// Insert a new record
    async fn insert(&self, scan: &NewScan) -> Result<ScanRecord, DomainError>;

    /// Whether the device was already scanned in the session
    async fn exists(&self, device_id: &DeviceId, session_id: SessionId)
    -> Result<bool, DomainError>;

    async fn count_by_session(&self, session_id: SessionId) -> Result<u64, DomainError>;

    /// All records of a session, newest first
    async fn find_by_session(&self, session_id: SessionId)
    -> Result<Vec<ScanRecord>, DomainError>;

    /// Most recent record for a device across all sessions
    async fn find_latest_by_device(
        &self,
        device_id: &DeviceId,
    ) -> Result<Option<ScanRecord>, DomainError>;

    /// Records matching `filter`, newest first, at most `limit` of them
    async fn find_matching(
        &self,
        filter: &ScanFilter,
        limit: Option<u64>,
    ) -> Result<Vec<ScanRecord>, DomainError>;

    /// Records matching `filter` with their session dates, newest first
    async fn list_with_sessions(
        &self,
        filter: &ScanFilter,
    ) -> Result<Vec<ScanListing>, DomainError>;
}
