use chrono::NaiveDateTime;
use sqlx::FromRow;

/// One row of the completions table, keyed by (user_id, puzzle_id).
#[derive(Debug, Clone, FromRow)]
pub struct Completion {
    pub user_id: i64,
    pub puzzle_id: i64,
    pub completion_time: i64,
    pub helps_used: i32,
    pub completed_at: NaiveDateTime,
}

/// A completion joined with the player's display name, as consumed by the
/// leaderboard ranking. `completed_at` doubles as the tie-break on equal
/// scores: the earlier finisher ranks higher.
#[derive(Debug, Clone, FromRow)]
pub struct CompletionRecord {
    pub user_id: i64,
    pub username: String,
    pub completion_time: i64,
    pub helps_used: i32,
    pub completed_at: NaiveDateTime,
}
