use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::DomainError;
use domain::scan::{DeviceId, NewScan, ScanFilter, ScanListing, ScanRecord, ScanRepository};
use domain::session::{Session, SessionId, SessionOverview, SessionRepository};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct StoreState {
    sessions: Vec<Session>,
    scans: Vec<ScanRecord>,
    last_session_id: i32,
    last_scan_id: i32,
}

impl StoreState {
    fn push_record(&mut self, scan: &NewScan, quantity: Option<u32>) -> ScanRecord {
        self.last_scan_id += 1;
        let record = ScanRecord {
            id: self.last_scan_id,
            device_id: scan.device_id.clone(),
            attributes: scan.attributes.clone(),
            quantity,
            created_at: scan.created_at,
            session_id: scan.session_id,
        };
        self.scans.push(record.clone());
        record
    }
}

fn newest_first(mut records: Vec<ScanRecord>) -> Vec<ScanRecord> {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    records
}

/// Process-local store implementing both repositories
///
/// Clones share the same state. Uniqueness of `(device_id, session_id)`
/// is checked under the same lock as the insert.
#[derive(Clone, Default)]
pub struct InMemoryInventoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a session with an explicit business date
    pub async fn insert_session(
        &self,
        date: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Result<Session, DomainError> {
        let mut state = self.state.lock().await;
        let session = Session {
            id: SessionId::new(state.last_session_id + 1),
            date,
            created_at,
        };
        state.last_session_id += 1;
        state.sessions.push(session.clone());
        Ok(session)
    }

    /// Seed a record as-is, bypassing the quantity the recorder would store
    pub async fn insert_record(&self, scan: &NewScan, quantity: Option<u32>) -> ScanRecord {
        self.state.lock().await.push_record(scan, quantity)
    }
}

#[async_trait]
impl SessionRepository for InMemoryInventoryStore {
    async fn create(&self, now: DateTime<Utc>) -> Result<Session, DomainError> {
        self.insert_session(now, now).await
    }

    async fn find_by_id(&self, id: SessionId) -> Result<Option<Session>, DomainError> {
        let state = self.state.lock().await;
        Ok(state.sessions.iter().find(|s| s.id == id).cloned())
    }

    async fn list_with_counts(&self) -> Result<Vec<SessionOverview>, DomainError> {
        let state = self.state.lock().await;
        let mut sessions = state.sessions.clone();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(sessions
            .into_iter()
            .map(|session| {
                let scan_count = state
                    .scans
                    .iter()
                    .filter(|r| r.session_id == session.id)
                    .count() as u64;
                SessionOverview {
                    session,
                    scan_count,
                }
            })
            .collect())
    }

    async fn find_latest_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Option<Session>, DomainError> {
        let state = self.state.lock().await;
        Ok(state
            .sessions
            .iter()
            .filter(|s| s.date >= since)
            .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
            .cloned())
    }

    async fn find_since(&self, since: DateTime<Utc>) -> Result<Vec<Session>, DomainError> {
        let state = self.state.lock().await;
        Ok(state
            .sessions
            .iter()
            .filter(|s| s.date >= since)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ScanRepository for InMemoryInventoryStore {
    async fn insert(&self, scan: &NewScan) -> Result<ScanRecord, DomainError> {
        let mut state = self.state.lock().await;
        if !state.sessions.iter().any(|s| s.id == scan.session_id) {
            return Err(DomainError::SessionNotFound(scan.session_id));
        }
        if state
            .scans
            .iter()
            .any(|r| r.device_id == scan.device_id && r.session_id == scan.session_id)
        {
            return Err(DomainError::DuplicateScan {
                device_id: scan.device_id.to_string(),
                session_id: scan.session_id,
            });
        }
        Ok(state.push_record(scan, Some(scan.quantity)))
    }

    async fn exists(
        &self,
        device_id: &DeviceId,
        session_id: SessionId,
    ) -> Result<bool, DomainError> {
        let state = self.state.lock().await;
        Ok(state
            .scans
            .iter()
            .any(|r| &r.device_id == device_id && r.session_id == session_id))
    }

    async fn count_by_session(&self, session_id: SessionId) -> Result<u64, DomainError> {
        let state = self.state.lock().await;
        Ok(state
            .scans
            .iter()
            .filter(|r| r.session_id == session_id)
            .count() as u64)
    }

    async fn find_by_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<ScanRecord>, DomainError> {
        let state = self.state.lock().await;
        let records = state
            .scans
            .iter()
            .filter(|r| r.session_id == session_id)
            .cloned()
            .collect();
        Ok(newest_first(records))
    }

    async fn find_latest_by_device(
        &self,
        device_id: &DeviceId,
    ) -> Result<Option<ScanRecord>, DomainError> {
        let state = self.state.lock().await;
        let records = state
            .scans
            .iter()
            .filter(|r| &r.device_id == device_id)
            .cloned()
            .collect();
        Ok(newest_first(records).into_iter().next())
    }

    async fn find_matching(
        &self,
        filter: &ScanFilter,
        limit: Option<u64>,
    ) -> Result<Vec<ScanRecord>, DomainError> {
        let state = self.state.lock().await;
        let records = state
            .scans
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        let mut records = newest_first(records);
        if let Some(limit) = limit {
            records.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        Ok(records)
    }

    async fn list_with_sessions(
        &self,
        filter: &ScanFilter,
    ) -> Result<Vec<ScanListing>, DomainError> {
        let records = self.find_matching(filter, None).await?;
        let state = self.state.lock().await;

        records
            .into_iter()
            .map(|record| {
                let session = state
                    .sessions
                    .iter()
                    .find(|s| s.id == record.session_id)
                    .ok_or(DomainError::SessionNotFound(record.session_id))?;
                Ok(ScanListing {
                    session_date: session.date,
                    record,
                })
            })
            .collect()
    }
}
