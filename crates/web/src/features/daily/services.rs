use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, Local};
use storage::{
    error::Result,
    models::Puzzle,
    repository::{completion::CompletionRepository, puzzle::PuzzleRepository},
    services::daily_schedule::DbPuzzlePool,
};

use crate::state::AppState;

/// Resolve the day's puzzle through the scheduler and fetch it.
pub async fn daily_puzzle(state: &AppState, day: Option<u32>) -> Result<Puzzle> {
    let pool = DbPuzzlePool::new(state.db.pool());
    let puzzle_id = state.scheduler.get_daily_puzzle_id(&pool, day).await?;

    PuzzleRepository::new(state.db.pool()).find_by_id(puzzle_id).await
}

/// Day-by-day completion status of this month's daily puzzles for one user,
/// from the 1st up to today.
pub async fn completion_status(state: &AppState, user_id: i64) -> Result<BTreeMap<String, bool>> {
    let today = Local::now().date_naive();

    let pool = DbPuzzlePool::new(state.db.pool());
    let assignment = state.scheduler.current_assignment(&pool).await?;

    let assigned: Vec<(u32, i64)> = (1..=today.day())
        .filter_map(|day| assignment.puzzle_for_day(day).map(|id| (day, id)))
        .collect();
    let puzzle_ids: Vec<i64> = assigned.iter().map(|(_, id)| *id).collect();

    let completed: HashSet<i64> = CompletionRepository::new(state.db.pool())
        .completed_puzzle_ids(user_id, &puzzle_ids)
        .await?
        .into_iter()
        .collect();

    Ok(assigned
        .into_iter()
        .map(|(day, id)| (day.to_string(), completed.contains(&id)))
        .collect())
}
