pub mod api;
pub mod error;
pub mod state;

use domain::BusinessCalendar;
use sea_orm::DatabaseConnection;
use state::AppState;
use std::sync::Arc;

pub async fn setup_app_state(
    db: DatabaseConnection,
    calendar: BusinessCalendar,
    record_cap: u64,
) -> Arc<AppState> {
    Arc::new(AppState::with_system_clock(db, calendar, record_cap))
}
