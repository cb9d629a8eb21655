use std::sync::Arc;
use tracing::{debug, info, warn};

use super::ScanRequest;
use domain::scan::{DeviceId, NewScan, ScanListing, ScanRecord, ScanRepository, scan_confirmation};
use domain::session::SessionRepository;
use domain::{BusinessCalendar, Clock, DomainError};
use serde::Serialize;

use crate::ScanQuery;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedScan {
    pub scan: ScanRecord,
    pub message: String,
}

/// Records scans while keeping each device unique within a session
pub struct ScanRecorder {
    sessions: Arc<dyn SessionRepository>,
    scans: Arc<dyn ScanRepository>,
    clock: Arc<dyn Clock>,
    calendar: BusinessCalendar,
}

impl ScanRecorder {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        scans: Arc<dyn ScanRepository>,
        clock: Arc<dyn Clock>,
        calendar: BusinessCalendar,
    ) -> Self {
        Self {
            sessions,
            scans,
            clock,
            calendar,
        }
    }

    pub async fn record_scan(&self, request: ScanRequest) -> Result<RecordedScan, DomainError> {
        let ScanRequest {
            device_id,
            session_id,
            attributes,
        } = request;

        if self.sessions.find_by_id(session_id).await?.is_none() {
            return Err(DomainError::SessionNotFound(session_id));
        }

        if self.scans.exists(&device_id, session_id).await? {
            debug!(device_id = %device_id, session_id = %session_id, "Duplicate scan rejected");
            return Err(DomainError::DuplicateScan {
                device_id: device_id.to_string(),
                session_id,
            });
        }

        let new_scan = NewScan::new(
            device_id.clone(),
            session_id,
            &attributes,
            self.clock.now(),
        );

        // Storage enforces the same uniqueness; a concurrent insert surfaces
        // here as DuplicateScan.
        let scan = match self.scans.insert(&new_scan).await {
            Ok(scan) => scan,
            Err(e @ DomainError::DuplicateScan { .. }) => {
                warn!(device_id = %device_id, session_id = %session_id, "Concurrent duplicate scan caught by storage");
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        info!(device_id = %device_id, session_id = %session_id, "Scan recorded");

        Ok(RecordedScan {
            message: scan_confirmation(&device_id, &attributes),
            scan,
        })
    }

    /// Latest scan of a device across all sessions
    pub async fn lookup_device(&self, device_id: &DeviceId) -> Result<ScanRecord, DomainError> {
        self.scans
            .find_latest_by_device(device_id)
            .await?
            .ok_or_else(|| DomainError::DeviceNotFound(device_id.to_string()))
    }

    /// Flat, newest-first listing of scans across sessions
    pub async fn list_scans(&self, query: &ScanQuery) -> Result<Vec<ScanListing>, DomainError> {
        let filter = query.to_filter(&self.calendar)?;
        self.scans.list_with_sessions(&filter).await
    }
}
