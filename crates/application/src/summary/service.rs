use std::sync::Arc;
use tracing::debug;

use domain::scan::ScanRepository;
use domain::session::{SessionId, SessionRepository};
use domain::summary::SessionSummary;
use domain::{BusinessCalendar, Clock, DomainError};

/// Per-session grouped summary
pub struct SummaryService {
    sessions: Arc<dyn SessionRepository>,
    scans: Arc<dyn ScanRepository>,
    clock: Arc<dyn Clock>,
    calendar: BusinessCalendar,
}

impl SummaryService {
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

    /// Summarize `session_id`, or today's latest session when none is given
    pub async fn summarize(
        &self,
        session_id: Option<SessionId>,
    ) -> Result<SessionSummary, DomainError> {
        let session_id = match session_id {
            Some(id) => id,
            None => self.resolve_today().await?,
        };

        let records = self.scans.find_by_session(session_id).await?;
        debug!(session_id = %session_id, records = records.len(), "Summarizing session");

        Ok(SessionSummary::from_records(session_id, &records))
    }

    async fn resolve_today(&self) -> Result<SessionId, DomainError> {
        let since = self.calendar.start_of_day(self.clock.now());
        self.sessions
            .find_latest_since(since)
            .await?
            .map(|session| session.id)
            .ok_or(DomainError::NoActiveSession)
    }
}
