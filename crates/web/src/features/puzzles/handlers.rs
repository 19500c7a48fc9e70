use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        puzzle::{CompletePuzzleRequest, CompletionResponse, PuzzleListFilter, PuzzleResponse},
    },
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthenticatedUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/puzzles",
    params(PuzzleListFilter),
    responses(
        (status = 200, description = "Puzzles retrieved successfully", body = PaginatedResponse<PuzzleResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "puzzles"
)]
pub async fn list_puzzles(
    State(db): State<Database>,
    Query(filter): Query<PuzzleListFilter>,
) -> Result<Response, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let (puzzles, total_items) = services::list_puzzles(db.pool(), &filter).await?;

    let response = PaginatedResponse::new(
        puzzles.into_iter().map(PuzzleResponse::from).collect(),
        filter.pagination.page,
        filter.pagination.page_size,
        total_items,
    );

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/puzzles/{puzzle_id}",
    params(
        ("puzzle_id" = i64, Path, description = "Puzzle id")
    ),
    responses(
        (status = 200, description = "Puzzle found", body = PuzzleResponse),
        (status = 404, description = "Puzzle not found")
    ),
    tag = "puzzles"
)]
pub async fn get_puzzle(
    State(db): State<Database>,
    Path(puzzle_id): Path<i64>,
) -> Result<Response, WebError> {
    let puzzle = services::get_puzzle(db.pool(), puzzle_id).await?;

    Ok(Json(PuzzleResponse::from(puzzle)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/puzzles/{puzzle_id}/complete",
    params(
        ("puzzle_id" = i64, Path, description = "Puzzle id")
    ),
    request_body = CompletePuzzleRequest,
    responses(
        (status = 201, description = "Completion recorded", body = CompletionResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Puzzle not found"),
        (status = 409, description = "Puzzle already completed by this user")
    ),
    tag = "puzzles"
)]
pub async fn complete_puzzle(
    State(db): State<Database>,
    user: AuthenticatedUser,
    Path(puzzle_id): Path<i64>,
    Json(req): Json<CompletePuzzleRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let completion = services::complete_puzzle(db.pool(), user.user_id, puzzle_id, &req).await?;

    Ok((StatusCode::CREATED, Json(CompletionResponse::from(completion))).into_response())
}
