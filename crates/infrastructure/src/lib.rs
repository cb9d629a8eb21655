//! Infrastructure layer - Persistence, configuration and export

pub mod config;
pub mod database;
pub mod export;

pub use config::ServerConfig;
pub use database::{InMemoryInventoryStore, SeaOrmScanRepository, SeaOrmSessionRepository};
