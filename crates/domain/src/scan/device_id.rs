use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Value object representing a scanned device identifier (IMEI or serial barcode)
///
/// Rules:
/// - Surrounding and embedded whitespace is dropped (scanners pad and group digits)
/// - Must be non-empty after normalization
/// - Digits only, at most 32 of them
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    const MAX_LEN: usize = 32;

    pub fn new(raw: impl AsRef<str>) -> Result<Self> {
        let id: String = raw
            .as_ref()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        if id.is_empty() {
            return Err(DomainError::MissingField("device_id"));
        }

        if id.len() > Self::MAX_LEN {
            return Err(DomainError::InvalidDeviceId(format!(
                "{} digits (max {})",
                id.len(),
                Self::MAX_LEN
            )));
        }

        if !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::InvalidDeviceId(format!(
                "'{id}' must contain digits only"
            )));
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
