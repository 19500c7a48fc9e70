use std::sync::Arc;

use axum::extract::FromRef;
use storage::Database;
use storage::repository::assignment::JsonFileStore;
use storage::services::daily_schedule::DailyPuzzleScheduler;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub scheduler: Arc<DailyPuzzleScheduler<JsonFileStore>>,
}

/// Lets handlers that only touch the database keep a `State<Database>`
/// signature instead of threading the full state through.
impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
