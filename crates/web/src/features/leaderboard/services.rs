use sqlx::PgPool;
use storage::{
    dto::leaderboard::{LeaderboardQuery, LeaderboardView},
    error::Result,
    services::leaderboard::{self, ScoreWeights},
};

/// Ranked leaderboard for a puzzle, contextualized around the caller
pub async fn get_leaderboard(
    pool: &PgPool,
    user_id: i64,
    puzzle_id: i64,
    query: &LeaderboardQuery,
) -> Result<LeaderboardView> {
    leaderboard::get_leaderboard(
        pool,
        user_id,
        puzzle_id,
        ScoreWeights::default(),
        query.size,
        query.range,
    )
    .await
}
