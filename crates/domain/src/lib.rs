//! Domain layer - Pure inventory rules with no external dependencies
//!
//! This crate contains:
//! - Entities (Session, ScanRecord)
//! - Value Objects (SessionId, DeviceId, Grade, ScanAttributes)
//! - Derived views (SessionSummary, FleetReport)
//! - Repository interfaces (traits)
//!
//! Principles:
//! - No dependencies on infrastructure
//! - Aggregates are recomputed from records, never stored
//! - Testable in isolation

pub mod calendar;
pub mod error;
pub mod report;
pub mod scan;
pub mod session;
pub mod summary;

// Re-export commonly used types
pub use calendar::{BusinessCalendar, Clock, FixedClock, SystemClock, TimeWindow};
pub use error::{DomainError, ErrorKind};
pub use report::FleetReport;
pub use scan::{DeviceId, Grade, ScanAttributes, ScanFilter, ScanRecord};
pub use session::{Session, SessionId, SessionOverview};
pub use summary::{GradeTotals, SessionSummary};
