use application::{ReportService, ScanRecorder, SessionService, SummaryService};
use domain::scan::ScanRepository;
use domain::session::SessionRepository;
use domain::{BusinessCalendar, Clock, SystemClock};
use infrastructure::{SeaOrmScanRepository, SeaOrmSessionRepository};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Services shared by every handler
pub struct AppState {
    pub sessions: SessionService,
    pub recorder: ScanRecorder,
    pub summaries: SummaryService,
    pub reports: ReportService,
}

impl AppState {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        scans: Arc<dyn ScanRepository>,
        clock: Arc<dyn Clock>,
        calendar: BusinessCalendar,
        record_cap: u64,
    ) -> Self {
        Self {
            sessions: SessionService::new(sessions.clone(), scans.clone(), clock.clone()),
            recorder: ScanRecorder::new(sessions.clone(), scans.clone(), clock.clone(), calendar),
            summaries: SummaryService::new(sessions.clone(), scans.clone(), clock.clone(), calendar),
            reports: ReportService::new(sessions, scans, clock, calendar, record_cap),
        }
    }

    /// Wire the sea-orm repositories over one connection pool
    pub fn from_database(
        db: DatabaseConnection,
        clock: Arc<dyn Clock>,
        calendar: BusinessCalendar,
        record_cap: u64,
    ) -> Self {
        let sessions = Arc::new(SeaOrmSessionRepository::new(db.clone()));
        let scans = Arc::new(SeaOrmScanRepository::new(db));
        Self::new(sessions, scans, clock, calendar, record_cap)
    }

    pub fn with_system_clock(
        db: DatabaseConnection,
        calendar: BusinessCalendar,
        record_cap: u64,
    ) -> Self {
        Self::from_database(db, Arc::new(SystemClock), calendar, record_cap)
    }
}
