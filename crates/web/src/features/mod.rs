use axum::Router;

use crate::state::AppState;

pub mod daily;
pub mod leaderboard;
pub mod puzzles;

pub fn api_routes() -> Router<AppState> {
    Router::new().nest(
        "/api/puzzles",
        puzzles::routes::routes()
            .merge(leaderboard::routes::routes())
            .merge(daily::routes::routes()),
    )
}
