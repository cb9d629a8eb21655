use crate::error::{DomainError, Result};
use chrono::{DateTime, Duration, FixedOffset, Local, Months, NaiveDate, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Inclusive UTC time range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

/// Local calendar the operators work in
///
/// Defines what "today", a calendar day and a calendar month mean for
/// session resolution, day filters and the monthly series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessCalendar {
    offset: FixedOffset,
}

impl BusinessCalendar {
    pub fn new(utc_offset_minutes: i32) -> Result<Self> {
        let offset = utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                DomainError::InvalidFilter(format!(
                    "UTC offset of {utc_offset_minutes} minutes is out of range"
                ))
            })?;
        Ok(Self { offset })
    }

    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// Calendar using the host's current local offset
    pub fn local() -> Self {
        Self {
            offset: Local::now().offset().fix(),
        }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Local 00:00:00.000 to 23:59:59.999 of `day`, expressed in UTC
    pub fn day_window(&self, day: NaiveDate) -> TimeWindow {
        let local_midnight = day.and_time(chrono::NaiveTime::MIN);
        let start = Utc.from_utc_datetime(
            &(local_midnight - Duration::seconds(i64::from(self.offset.local_minus_utc()))),
        );
        let end = start + Duration::days(1) - Duration::milliseconds(1);
        TimeWindow { start, end }
    }

    /// Start of the local day containing `now`
    pub fn start_of_day(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.day_window(self.local_date(now)).start
    }

    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// Month label in the local calendar, e.g. "2024-03"
    pub fn month_label(&self, instant: DateTime<Utc>) -> String {
        instant.with_timezone(&self.offset).format("%Y-%m").to_string()
    }

    /// Same instant twelve months earlier
    pub fn twelve_months_before(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_months(Months::new(12))
            .unwrap_or_else(|| now - Duration::days(365))
    }

    /// Parse a caller-supplied calendar day ("YYYY-MM-DD")
    pub fn parse_day(raw: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| DomainError::InvalidFilter(format!("'{raw}' is not a YYYY-MM-DD date")))
    }
}

impl Default for BusinessCalendar {
    fn default() -> Self {
        Self::local()
    }
}
