use std::sync::Arc;
use tracing::{debug, warn};

use domain::report::FleetReport;
use domain::scan::ScanRepository;
use domain::session::SessionRepository;
use domain::{BusinessCalendar, Clock, DomainError};

use crate::ScanQuery;

/// Default number of records a single report may scan
pub const DEFAULT_RECORD_CAP: u64 = 10_000;

/// Cross-session statistics
pub struct ReportService {
    sessions: Arc<dyn SessionRepository>,
    scans: Arc<dyn ScanRepository>,
    clock: Arc<dyn Clock>,
    calendar: BusinessCalendar,
    record_cap: u64,
}

impl ReportService {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        scans: Arc<dyn ScanRepository>,
        clock: Arc<dyn Clock>,
        calendar: BusinessCalendar,
        record_cap: u64,
    ) -> Self {
        Self {
            sessions,
            scans,
            clock,
            calendar,
            record_cap,
        }
    }

    pub fn record_cap(&self) -> u64 {
        self.record_cap
    }

    pub async fn report(&self, query: &ScanQuery) -> Result<FleetReport, DomainError> {
        let filter = query.to_filter(&self.calendar)?;
        // One row past the cap tells whether anything was left out
        let mut records = self
            .scans
            .find_matching(&filter, Some(self.record_cap.saturating_add(1)))
            .await?;
        let cap = usize::try_from(self.record_cap).unwrap_or(usize::MAX);
        let truncated = records.len() > cap;
        records.truncate(cap);

        let since = self.calendar.twelve_months_before(self.clock.now());
        let sessions = self.sessions.find_since(since).await?;

        let report = FleetReport::build(&records, &sessions, &self.calendar, truncated);
        if report.truncated {
            warn!(cap = self.record_cap, "Fleet report hit the record cap");
        }
        debug!(
            records = report.record_count,
            sessions = sessions.len(),
            "Fleet report computed"
        );

        Ok(report)
    }
}
