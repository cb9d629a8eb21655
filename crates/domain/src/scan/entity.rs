use super::{DeviceId, NormalizedAttributes, ScanAttributes};
use crate::session::SessionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One accepted scan of one physical unit within one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub id: i32,
    pub device_id: DeviceId,
    #[serde(flatten)]
    pub attributes: NormalizedAttributes,
    /// Stored as 1 by the recorder; older rows may carry none
    pub quantity: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub session_id: SessionId,
}

impl ScanRecord {
    pub fn effective_quantity(&self) -> u64 {
        u64::from(self.quantity.unwrap_or(1))
    }
}

/// A validated scan waiting to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewScan {
    pub device_id: DeviceId,
    pub session_id: SessionId,
    pub attributes: NormalizedAttributes,
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
}

impl NewScan {
    pub fn new(
        device_id: DeviceId,
        session_id: SessionId,
        attributes: &ScanAttributes,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            device_id,
            session_id,
            attributes: attributes.normalize(),
            quantity: 1,
            created_at,
        }
    }
}

/// Confirmation shown to the operator after a successful scan
pub fn scan_confirmation(device_id: &DeviceId, attributes: &ScanAttributes) -> String {
    match attributes.label() {
        Some(label) => format!("+1 ({label})"),
        None => format!("+1 ({device_id})"),
    }
}

/// A scan record together with the business date of its session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanListing {
    #[serde(flatten)]
    pub record: ScanRecord,
    pub session_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(quantity: Option<u32>) -> ScanRecord {
        ScanRecord {
            id: 1,
            device_id: DeviceId::new("111").unwrap(),
            attributes: ScanAttributes::default().normalize(),
            quantity,
            created_at: Utc::now(),
            session_id: SessionId::new(7),
        }
    }

    #[test]
    fn test_effective_quantity_defaults_to_one() {
        assert_eq!(record(None).effective_quantity(), 1);
        assert_eq!(record(Some(3)).effective_quantity(), 3);
    }

    #[test]
    fn test_new_scan_is_normalized_with_unit_quantity() {
        let attrs = ScanAttributes {
            model: Some(" X ".into()),
            ..Default::default()
        };
        let scan = NewScan::new(
            DeviceId::new("111").unwrap(),
            SessionId::new(7),
            &attrs,
            Utc::now(),
        );
        assert_eq!(scan.quantity, 1);
        assert_eq!(scan.attributes.model, "X");
        assert_eq!(scan.attributes.brand, "Inconnu");
    }

    #[test]
    fn test_confirmation_falls_back_to_device_id() {
        let device_id = DeviceId::new("111").unwrap();
        let attrs = ScanAttributes {
            brand: Some("Apple".into()),
            model: Some("iPhone 12".into()),
            ..Default::default()
        };
        assert_eq!(scan_confirmation(&device_id, &attrs), "+1 (Apple iPhone 12)");
        assert_eq!(
            scan_confirmation(&device_id, &ScanAttributes::default()),
            "+1 (111)"
        );
    }

    #[test]
    fn test_record_serializes_flat() {
        let json = serde_json::to_value(record(Some(1))).unwrap();
        assert_eq!(json["device_id"], "111");
        assert_eq!(json["model"], "Inconnu");
        assert_eq!(json["grade"], "N/A");
        assert_eq!(json["session_id"], 7);
    }
}
