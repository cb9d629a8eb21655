mod entity;
mod repository;
mod session_id;

pub use entity::{Session, SessionOverview};
#[cfg(any(test, feature = "mocks"))]
pub use repository::MockSessionRepository;
pub use repository::SessionRepository;
pub use session_id::SessionId;
