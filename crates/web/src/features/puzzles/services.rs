use sqlx::PgPool;
use storage::{
    dto::puzzle::{CompletePuzzleRequest, PuzzleListFilter},
    error::Result,
    models::{Completion, Puzzle},
    repository::{completion::CompletionRepository, puzzle::PuzzleRepository},
};

/// List published puzzles with filtering and pagination
pub async fn list_puzzles(pool: &PgPool, filter: &PuzzleListFilter) -> Result<(Vec<Puzzle>, i64)> {
    let repo = PuzzleRepository::new(pool);
    repo.list(filter).await
}

pub async fn get_puzzle(pool: &PgPool, puzzle_id: i64) -> Result<Puzzle> {
    let repo = PuzzleRepository::new(pool);
    repo.find_by_id(puzzle_id).await
}

/// Record a completion for the user. The puzzle must exist; a repeat
/// completion of the same puzzle is a conflict.
pub async fn complete_puzzle(
    pool: &PgPool,
    user_id: i64,
    puzzle_id: i64,
    req: &CompletePuzzleRequest,
) -> Result<Completion> {
    PuzzleRepository::new(pool).find_by_id(puzzle_id).await?;

    let repo = CompletionRepository::new(pool);
    repo.create(user_id, puzzle_id, req).await
}
