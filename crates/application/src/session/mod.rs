mod service;

pub use service::{CreatedSession, SessionService};
