use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{Completion, Puzzle};

#[derive(Debug, Deserialize, IntoParams)]
pub struct PuzzleListFilter {
    #[serde(flatten)]
    pub pagination: super::common::PaginationParams,
    /// Restrict the listing to one difficulty level.
    pub level: Option<i32>,
}

impl PuzzleListFilter {
    pub fn validate(&self) -> Result<(), String> {
        self.pagination.validate()?;

        if let Some(level) = self.level
            && level < 1
        {
            return Err("level must be >= 1".to_string());
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DailyPuzzleQuery {
    /// Specific day of the current month (1-31); defaults to today.
    pub day: Option<u32>,
}

/// Public view of a puzzle. The solution never leaves the storage layer.
#[derive(Debug, Serialize, ToSchema)]
pub struct PuzzleResponse {
    pub puzzle_id: i64,
    pub level: i32,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub bin_values: Option<String>,
    pub published: bool,
    pub created_at: NaiveDateTime,
}

impl From<Puzzle> for PuzzleResponse {
    fn from(puzzle: Puzzle) -> Self {
        Self {
            puzzle_id: puzzle.puzzle_id,
            level: puzzle.level,
            width: puzzle.width,
            height: puzzle.height,
            bin_values: puzzle.bin_values,
            published: puzzle.published,
            created_at: puzzle.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CompletePuzzleRequest {
    /// Time taken to solve the puzzle, in seconds.
    #[validate(range(min = 0, max = 86400))]
    pub completion_time: i64,
    #[validate(range(min = 0, max = 100))]
    pub helps_used: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CompletionResponse {
    pub puzzle_id: i64,
    pub completion_time: i64,
    pub helps_used: i32,
    pub completed_at: NaiveDateTime,
}

impl From<Completion> for CompletionResponse {
    fn from(completion: Completion) -> Self {
        Self {
            puzzle_id: completion.puzzle_id,
            completion_time: completion.completion_time,
            helps_used: completion.helps_used,
            completed_at: completion.completed_at,
        }
    }
}
