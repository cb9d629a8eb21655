use domain::scan::{DeviceId, ScanAttributes};
use domain::{DomainError, SessionId};
use serde_json::Value;

/// A scan submitted by an operator, validated and typed
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRequest {
    pub device_id: DeviceId,
    pub session_id: SessionId,
    pub attributes: ScanAttributes,
}

impl ScanRequest {
    /// Coerce an untyped request body:
    /// `{"device_id": "...", "session_id": 7 | "7", "attributes": {...}}`
    pub fn from_json(body: &Value) -> Result<Self, DomainError> {
        let device_id = match body.get("device_id") {
            Some(Value::String(s)) => DeviceId::new(s)?,
            Some(Value::Number(n)) => DeviceId::new(n.to_string())?,
            Some(Value::Null) | None => return Err(DomainError::MissingField("device_id")),
            Some(other) => {
                return Err(DomainError::InvalidDeviceId(format!(
                    "unsupported value {other}"
                )));
            }
        };

        let session_id = SessionId::from_json(body.get("session_id").unwrap_or(&Value::Null))?;
        let attributes =
            ScanAttributes::from_json(body.get("attributes").unwrap_or(&Value::Null))?;

        Ok(Self {
            device_id,
            session_id,
            attributes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_body() {
        let request = ScanRequest::from_json(&json!({
            "device_id": " 356938035643809 ",
            "session_id": "7",
            "attributes": { "brand": "Apple", "model": "iPhone 12" }
        }))
        .unwrap();

        assert_eq!(request.device_id.as_str(), "356938035643809");
        assert_eq!(request.session_id.value(), 7);
        assert_eq!(request.attributes.model.as_deref(), Some("iPhone 12"));
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            ScanRequest::from_json(&json!({ "session_id": 7, "attributes": {} })),
            Err(DomainError::MissingField("device_id"))
        );
        assert_eq!(
            ScanRequest::from_json(&json!({ "device_id": "111", "attributes": {} })),
            Err(DomainError::MissingField("session_id"))
        );
        assert_eq!(
            ScanRequest::from_json(&json!({ "device_id": "111", "session_id": 7 })),
            Err(DomainError::MissingField("attributes"))
        );
        assert_eq!(
            ScanRequest::from_json(&json!({ "device_id": "  ", "session_id": 7, "attributes": {} })),
            Err(DomainError::MissingField("device_id"))
        );
    }

    #[test]
    fn test_malformed_session_id() {
        assert!(matches!(
            ScanRequest::from_json(&json!({
                "device_id": "111",
                "session_id": "seven",
                "attributes": {}
            })),
            Err(DomainError::InvalidSessionId(_))
        ));
    }

    #[test]
    fn test_numeric_device_id() {
        let request = ScanRequest::from_json(&json!({
            "device_id": 111,
            "session_id": 7,
            "attributes": {}
        }))
        .unwrap();
        assert_eq!(request.device_id.as_str(), "111");
    }
}
