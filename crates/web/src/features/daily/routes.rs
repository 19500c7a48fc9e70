use axum::{Router, routing::get};

use crate::state::AppState;

use super::handlers::{get_daily_completed, get_daily_puzzle};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/daily", get(get_daily_puzzle))
        .route("/daily/completed", get(get_daily_completed))
}
