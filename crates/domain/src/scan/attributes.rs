use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder stored for unknown descriptive attributes
pub const UNKNOWN: &str = "Inconnu";
/// Placeholder stored for an unknown grade, and shown for blanks in detail rows
pub const NOT_APPLICABLE: &str = "N/A";
/// Availability label assumed when the scanner reports none
pub const DEFAULT_STATUS: &str = "Disponible";

/// Attributes as reported by the scanning client; any of them may be absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanAttributes {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub capacity: Option<String>,
    pub color: Option<String>,
    pub grade: Option<String>,
    pub status: Option<String>,
}

impl ScanAttributes {
    /// Coerce a loosely-typed JSON value. Must be an object; non-string
    /// scalar fields (e.g. a numeric capacity) are stringified.
    pub fn from_json(value: &Value) -> Result<Self> {
        let map = match value {
            Value::Object(map) => map,
            Value::Null => return Err(DomainError::MissingField("attributes")),
            _ => {
                return Err(DomainError::InvalidAttributes(
                    "attributes must be an object".to_string(),
                ));
            }
        };

        let field = |name: &str| -> Option<String> {
            match map.get(name)? {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            }
        };

        Ok(Self {
            brand: field("brand"),
            model: field("model"),
            capacity: field("capacity"),
            color: field("color"),
            grade: field("grade"),
            status: field("status"),
        })
    }

    /// Substitute placeholders so grouping keys never contain empty strings
    pub fn normalize(&self) -> NormalizedAttributes {
        NormalizedAttributes {
            brand: or_placeholder(self.brand.as_deref(), UNKNOWN),
            model: or_placeholder(self.model.as_deref(), UNKNOWN),
            capacity: or_placeholder(self.capacity.as_deref(), UNKNOWN),
            color: or_placeholder(self.color.as_deref(), UNKNOWN),
            grade: or_placeholder(self.grade.as_deref(), NOT_APPLICABLE),
            status: or_placeholder(self.status.as_deref(), DEFAULT_STATUS),
        }
    }

    /// Short label used in confirmations, e.g. "Apple iPhone 12"
    pub fn label(&self) -> Option<String> {
        let parts: Vec<&str> = [self.brand.as_deref(), self.model.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// Attributes as persisted: trimmed, never blank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedAttributes {
    pub brand: String,
    pub model: String,
    pub capacity: String,
    pub color: String,
    pub grade: String,
    pub status: String,
}

/// Trimmed value, or `placeholder` when absent or blank
pub fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}
