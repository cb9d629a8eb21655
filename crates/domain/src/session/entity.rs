use super::SessionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scanning batch
///
/// Sessions are append-only: created once, never updated by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    /// Nominal business date, equal to the creation instant unless imported otherwise
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn confirmation_message(&self) -> String {
        format!("New inventory session #{} created", self.id)
    }
}

/// A session annotated with its derived scan count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionOverview {
    #[serde(flatten)]
    pub session: Session,
    pub scan_count: u64,
}
