use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value object representing a Session identifier
///
/// Any well-formed integer is accepted; ids storage never assigned
/// simply match no session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(i32);

impl SessionId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Parse a caller-supplied identifier such as a path or query segment
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let id = trimmed
            .parse::<i32>()
            .map_err(|_| DomainError::InvalidSessionId(format!("'{trimmed}' is not an integer")))?;
        Ok(Self::new(id))
    }

    /// Coerce a loosely-typed JSON value (number or numeric string)
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => {
                let id = n
                    .as_i64()
                    .and_then(|v| i32::try_from(v).ok())
                    .ok_or_else(|| DomainError::InvalidSessionId(format!("{n} is not an integer")))?;
                Ok(Self::new(id))
            }
            Value::String(s) => Self::parse(s),
            Value::Null => Err(DomainError::MissingField("session_id")),
            other => Err(DomainError::InvalidSessionId(format!(
                "unsupported value {other}"
            ))),
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
