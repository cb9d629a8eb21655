mod aggregate;
mod grade_totals;

pub use aggregate::{DetailRow, GroupKey, GroupedSummary, SessionSummary};
pub use grade_totals::GradeTotals;
