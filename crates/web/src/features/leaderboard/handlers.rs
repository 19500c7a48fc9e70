use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::leaderboard::{LeaderboardQuery, LeaderboardView},
};

use crate::error::WebError;
use crate::middleware::auth::AuthenticatedUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/puzzles/{puzzle_id}/leaderboard",
    params(
        ("puzzle_id" = i64, Path, description = "Puzzle id"),
        LeaderboardQuery
    ),
    responses(
        (status = 200, description = "Leaderboard retrieved successfully", body = LeaderboardView),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(
    State(db): State<Database>,
    user: AuthenticatedUser,
    Path(puzzle_id): Path<i64>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Response, WebError> {
    query.validate().map_err(WebError::BadRequest)?;

    let view = services::get_leaderboard(db.pool(), user.user_id, puzzle_id, &query).await?;

    Ok(Json(view).into_response())
}
