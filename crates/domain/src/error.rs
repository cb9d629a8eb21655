use thiserror::Error;

use crate::session::SessionId;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid session ID: {0}")]
    InvalidSessionId(String),

    #[error("Invalid device ID: {0}")]
    InvalidDeviceId(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid scan attributes: {0}")]
    InvalidAttributes(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Device {device_id} has already been scanned in session #{session_id}")]
    DuplicateScan {
        device_id: String,
        session_id: SessionId,
    },

    #[error("No active session today")]
    NoActiveSession,

    #[error("Session not found: #{0}")]
    SessionNotFound(SessionId),

    #[error("Device never scanned: {0}")]
    DeviceNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Coarse classification callers use to pick an outcome for the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    Storage,
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSessionId(_)
            | Self::InvalidDeviceId(_)
            | Self::MissingField(_)
            | Self::InvalidAttributes(_)
            | Self::InvalidFilter(_) => ErrorKind::Validation,
            Self::DuplicateScan { .. } => ErrorKind::Conflict,
            Self::NoActiveSession | Self::SessionNotFound(_) | Self::DeviceNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    pub fn storage(err: impl std::fmt::Display) -> Self {
        Self::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            DomainError::InvalidSessionId("abc".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            DomainError::MissingField("device_id").kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            DomainError::DuplicateScan {
                device_id: "111".into(),
                session_id: SessionId::new(7),
            }
            .kind(),
            ErrorKind::Conflict
        );
        assert_eq!(DomainError::NoActiveSession.kind(), ErrorKind::NotFound);
        assert_eq!(
            DomainError::storage("connection refused").kind(),
            ErrorKind::Storage
        );
    }

    #[test]
    fn test_duplicate_message() {
        let err = DomainError::DuplicateScan {
            device_id: "111".into(),
            session_id: SessionId::new(7),
        };
        assert_eq!(
            err.to_string(),
            "Device 111 has already been scanned in session #7"
        );
    }
}
