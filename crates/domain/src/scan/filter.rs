use super::ScanRecord;
use crate::calendar::TimeWindow;

/// Cross-session selection of scan records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanFilter {
    /// Case-insensitive substring of the model
    pub model_contains: Option<String>,
    /// Creation instant must fall within this window
    pub created_within: Option<TimeWindow>,
}

impl ScanFilter {
    pub fn new(model_contains: Option<&str>, created_within: Option<TimeWindow>) -> Self {
        let model_contains = model_contains
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        Self {
            model_contains,
            created_within,
        }
    }

    pub fn matches(&self, record: &ScanRecord) -> bool {
        if let Some(needle) = &self.model_contains {
            if !record
                .attributes
                .model
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }

        if let Some(window) = &self.created_within {
            if !window.contains(record.created_at) {
                return false;
            }
        }

        true
    }
}
