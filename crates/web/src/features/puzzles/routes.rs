use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::handlers::{complete_puzzle, get_puzzle, list_puzzles};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_puzzles))
        .route("/:puzzle_id", get(get_puzzle))
        .route("/:puzzle_id/complete", post(complete_puzzle))
}
