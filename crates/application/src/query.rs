use chrono::NaiveDate;
use domain::scan::ScanFilter;
use domain::{BusinessCalendar, DomainError};
use serde::Deserialize;

/// Cross-session filters as received from a caller
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScanQuery {
    pub model: Option<String>,
    /// Calendar day, "YYYY-MM-DD"
    pub date: Option<String>,
}

impl ScanQuery {
    pub fn day(&self) -> Result<Option<NaiveDate>, DomainError> {
        match self.date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => BusinessCalendar::parse_day(raw).map(Some),
            _ => Ok(None),
        }
    }

    /// Resolve against the business calendar into a storage filter
    pub fn to_filter(&self, calendar: &BusinessCalendar) -> Result<ScanFilter, DomainError> {
        let window = self.day()?.map(|day| calendar.day_window(day));
        Ok(ScanFilter::new(self.model.as_deref(), window))
    }
}
