use super::GradeTotals;
use crate::scan::{NOT_APPLICABLE, ScanRecord, UNKNOWN, or_placeholder};
use crate::session::SessionId;
use chrono::SecondsFormat;
use serde::Serialize;
use std::collections::HashMap;

/// Grouping key of a summary row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GroupKey {
    pub model: String,
    pub capacity: String,
    pub color: String,
    pub grade: String,
}

impl GroupKey {
    fn of(record: &ScanRecord) -> Self {
        let attrs = &record.attributes;
        Self {
            model: or_placeholder(Some(&attrs.model), UNKNOWN),
            capacity: or_placeholder(Some(&attrs.capacity), UNKNOWN),
            color: or_placeholder(Some(&attrs.color), UNKNOWN),
            grade: or_placeholder(Some(&attrs.grade), UNKNOWN),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedSummary {
    #[serde(flatten)]
    pub key: GroupKey,
    pub total: u64,
}

/// Flat export row for one scan record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    pub device_id: String,
    pub brand: String,
    pub model: String,
    pub capacity: String,
    pub color: String,
    pub grade: String,
    pub status: String,
    pub quantity: u64,
    /// RFC 3339, UTC, millisecond precision
    pub scanned_at: String,
}

impl From<&ScanRecord> for DetailRow {
    fn from(record: &ScanRecord) -> Self {
        let attrs = &record.attributes;
        let field = |v: &str| or_placeholder(Some(v), NOT_APPLICABLE);
        Self {
            device_id: field(record.device_id.as_str()),
            brand: field(&attrs.brand),
            model: field(&attrs.model),
            capacity: field(&attrs.capacity),
            color: field(&attrs.color),
            grade: field(&attrs.grade),
            status: field(&attrs.status),
            quantity: record.effective_quantity(),
            scanned_at: record
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Per-session summary, recomputed from the records on every request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub groups: Vec<GroupedSummary>,
    pub grade_totals: GradeTotals,
    pub grand_total: u64,
    pub details: Vec<DetailRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SessionSummary {
    /// Aggregate `records` (expected newest first).
    ///
    /// Groups keep the order in which their key was first seen.
    pub fn from_records(session_id: SessionId, records: &[ScanRecord]) -> Self {
        if records.is_empty() {
            return Self {
                session_id,
                groups: Vec::new(),
                grade_totals: GradeTotals::default(),
                grand_total: 0,
                details: Vec::new(),
                message: Some("No devices scanned in this session".to_string()),
            };
        }

        let mut groups: Vec<GroupedSummary> = Vec::new();
        let mut index: HashMap<GroupKey, usize> = HashMap::new();

        for record in records {
            let key = GroupKey::of(record);
            let slot = *index.entry(key.clone()).or_insert_with(|| {
                groups.push(GroupedSummary { key, total: 0 });
                groups.len() - 1
            });
            groups[slot].total += record.effective_quantity();
        }

        let mut grade_totals = GradeTotals::default();
        for group in &groups {
            grade_totals.add(&group.key.grade, group.total);
        }

        Self {
            session_id,
            grand_total: grade_totals.total(),
            grade_totals,
            groups,
            details: records.iter().map(DetailRow::from).collect(),
            message: None,
        }
    }
}
