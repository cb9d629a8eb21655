use super::FrequencyTable;
use crate::calendar::BusinessCalendar;
use crate::scan::{ScanRecord, UNKNOWN, or_placeholder};
use crate::session::Session;
use serde::Serialize;
use std::collections::BTreeMap;

/// Outer key -> (color -> summed quantity)
pub type CrossTab = BTreeMap<String, BTreeMap<String, u64>>;

/// Cross-session statistics for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetReport {
    /// Sessions per local month ("YYYY-MM"), months without sessions omitted
    pub sessions_per_month: BTreeMap<String, u64>,
    pub models: BTreeMap<String, u64>,
    pub colors: BTreeMap<String, u64>,
    pub grades: BTreeMap<String, u64>,
    pub colors_by_grade: CrossTab,
    pub colors_by_model: CrossTab,
    pub most_frequent_model: Option<String>,
    pub least_frequent_model: Option<String>,
    pub most_frequent_color: Option<String>,
    pub most_frequent_grade: Option<String>,
    /// Number of records the statistics were computed from
    pub record_count: usize,
    /// True when the record cap was reached and older records were left out
    pub truncated: bool,
}

impl FleetReport {
    /// Build the report in a single pass over `records`.
    ///
    /// `sessions` are the sessions of the trailing twelve months; `truncated`
    /// tells whether matching records beyond `records` were left out.
    pub fn build(
        records: &[ScanRecord],
        sessions: &[Session],
        calendar: &BusinessCalendar,
        truncated: bool,
    ) -> Self {
        let mut models = FrequencyTable::new();
        let mut colors = FrequencyTable::new();
        let mut grades = FrequencyTable::new();
        let mut colors_by_grade = CrossTab::new();
        let mut colors_by_model = CrossTab::new();

        for record in records {
            let attrs = &record.attributes;
            let model = or_placeholder(Some(&attrs.model), UNKNOWN);
            let color = or_placeholder(Some(&attrs.color), UNKNOWN);
            let grade = or_placeholder(Some(&attrs.grade), UNKNOWN);
            let quantity = record.effective_quantity();

            models.add(&model, quantity);
            colors.add(&color, quantity);
            grades.add(&grade, quantity);

            *colors_by_grade
                .entry(grade)
                .or_default()
                .entry(color.clone())
                .or_default() += quantity;
            *colors_by_model
                .entry(model)
                .or_default()
                .entry(color)
                .or_default() += quantity;
        }

        let mut sessions_per_month = BTreeMap::new();
        for session in sessions {
            *sessions_per_month
                .entry(calendar.month_label(session.date))
                .or_default() += 1;
        }

        Self {
            sessions_per_month,
            most_frequent_model: models.most_frequent().map(str::to_string),
            least_frequent_model: models.least_frequent().map(str::to_string),
            most_frequent_color: colors.most_frequent().map(str::to_string),
            most_frequent_grade: grades.most_frequent().map(str::to_string),
            models: models.to_map(),
            colors: colors.to_map(),
            grades: grades.to_map(),
            colors_by_grade,
            colors_by_model,
            record_count: records.len(),
            truncated,
        }
    }
}
