mod service;

pub use service::{DEFAULT_RECORD_CAP, ReportService};
