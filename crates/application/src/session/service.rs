use std::sync::Arc;
use tracing::info;

use domain::scan::ScanRepository;
use domain::session::{Session, SessionId, SessionOverview, SessionRepository};
use domain::{Clock, DomainError};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedSession {
    #[serde(flatten)]
    pub session: Session,
    pub message: String,
}

/// Creates and looks up inventory sessions
pub struct SessionService {
    sessions: Arc<dyn SessionRepository>,
    scans: Arc<dyn ScanRepository>,
    clock: Arc<dyn Clock>,
}

impl SessionService {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        scans: Arc<dyn ScanRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions,
            scans,
            clock,
        }
    }

    pub async fn create_session(&self) -> Result<CreatedSession, DomainError> {
        let session = self.sessions.create(self.clock.now()).await?;
        info!(session_id = %session.id, "Inventory session created");

        Ok(CreatedSession {
            message: session.confirmation_message(),
            session,
        })
    }

    /// Most recent first, each with its current scan count
    pub async fn list_sessions(&self) -> Result<Vec<SessionOverview>, DomainError> {
        self.sessions.list_with_counts().await
    }

    pub async fn count_scans(&self, session_id: SessionId) -> Result<u64, DomainError> {
        self.scans.count_by_session(session_id).await
    }
}
