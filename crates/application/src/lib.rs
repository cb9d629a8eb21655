//! Application layer - Use cases over the inventory repositories

pub mod query;
pub mod report;
pub mod scan;
pub mod session;
pub mod summary;

pub use query::ScanQuery;
pub use report::{DEFAULT_RECORD_CAP, ReportService};
pub use scan::{RecordedScan, ScanRecorder, ScanRequest};
pub use session::{CreatedSession, SessionService};
pub use summary::SummaryService;
