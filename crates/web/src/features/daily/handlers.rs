use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::dto::puzzle::{DailyPuzzleQuery, PuzzleResponse};

use crate::error::WebError;
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/puzzles/daily",
    params(DailyPuzzleQuery),
    responses(
        (status = 200, description = "Daily puzzle retrieved successfully", body = PuzzleResponse),
        (status = 404, description = "No puzzle assigned to the requested day"),
        (status = 503, description = "Daily puzzle generation failed")
    ),
    tag = "daily"
)]
pub async fn get_daily_puzzle(
    State(state): State<AppState>,
    Query(query): Query<DailyPuzzleQuery>,
) -> Result<Response, WebError> {
    let puzzle = services::daily_puzzle(&state, query.day).await?;

    Ok(Json(PuzzleResponse::from(puzzle)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/puzzles/daily/completed",
    responses(
        (status = 200, description = "Completion status per day of the current month"),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "Daily puzzle generation failed")
    ),
    tag = "daily"
)]
pub async fn get_daily_completed(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Response, WebError> {
    let status = services::completion_status(&state, user.user_id).await?;

    Ok(Json(status).into_response())
}
