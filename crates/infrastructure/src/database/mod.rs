mod memory_repository;
mod scan_repository;
mod session_repository;

pub mod entities;

pub use memory_repository::InMemoryInventoryStore;
pub use scan_repository::SeaOrmScanRepository;
pub use session_repository::SeaOrmSessionRepository;

use chrono::{DateTime, FixedOffset, Utc};
use domain::DomainError;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use std::time::Duration;
use tracing::info;

/// Open the shared connection pool
pub async fn connect(url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(url.to_owned());
    options
        .max_connections(max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    info!(backend = ?db.get_database_backend(), "Database connection pool ready");
    Ok(db)
}

/// Instants are stored at offset +00:00 so they compare correctly on every backend
pub(crate) fn to_offset(dt: DateTime<Utc>) -> DateTime<FixedOffset> {
    dt.fixed_offset()
}

pub(crate) fn to_utc(dt: DateTime<FixedOffset>) -> DateTime<Utc> {
    dt.with_timezone(&Utc)
}

pub(crate) fn db_error(e: DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}
