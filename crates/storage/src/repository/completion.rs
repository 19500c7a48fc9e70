use sqlx::PgPool;

use crate::dto::puzzle::CompletePuzzleRequest;
use crate::error::{Result, StorageError};
use crate::models::{Completion, CompletionRecord};

pub struct CompletionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CompletionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All completions for a puzzle, joined with the player's username.
    pub async fn fetch_completions(&self, puzzle_id: i64) -> Result<Vec<CompletionRecord>> {
        let records = sqlx::query_as::<_, CompletionRecord>(
            r#"
            SELECT c.user_id, u.username, c.completion_time, c.helps_used, c.completed_at
            FROM completions c
            INNER JOIN users u ON u.user_id = c.user_id
            WHERE c.puzzle_id = $1
            "#,
        )
        .bind(puzzle_id)
        .fetch_all(self.pool)
        .await?;

        Ok(records)
    }

    /// Look up one user's completion of one puzzle, if any.
    pub async fn get(&self, user_id: i64, puzzle_id: i64) -> Result<Option<Completion>> {
        let completion = sqlx::query_as::<_, Completion>(
            r#"
            SELECT user_id, puzzle_id, completion_time, helps_used, completed_at
            FROM completions
            WHERE user_id = $1 AND puzzle_id = $2
            "#,
        )
        .bind(user_id)
        .bind(puzzle_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(completion)
    }

    /// Record a completion. Each (user, puzzle) pair completes at most once;
    /// a second attempt surfaces as a constraint violation.
    pub async fn create(
        &self,
        user_id: i64,
        puzzle_id: i64,
        req: &CompletePuzzleRequest,
    ) -> Result<Completion> {
        let result = sqlx::query_as::<_, Completion>(
            r#"
            INSERT INTO completions (user_id, puzzle_id, completion_time, helps_used)
            VALUES ($1, $2, $3, $4)
            RETURNING user_id, puzzle_id, completion_time, helps_used, completed_at
            "#,
        )
        .bind(user_id)
        .bind(puzzle_id)
        .bind(req.completion_time)
        .bind(req.helps_used)
        .fetch_one(self.pool)
        .await;

        match result {
            Ok(completion) => Ok(completion),
            Err(e) => {
                let error = StorageError::from(e);
                if error.is_unique_violation() {
                    Err(StorageError::ConstraintViolation(
                        "Puzzle already completed by this user".to_string(),
                    ))
                } else {
                    Err(error)
                }
            }
        }
    }

    /// Filter `puzzle_ids` down to the ones the user has completed.
    pub async fn completed_puzzle_ids(
        &self,
        user_id: i64,
        puzzle_ids: &[i64],
    ) -> Result<Vec<i64>> {
        if puzzle_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT puzzle_id
            FROM completions
            WHERE user_id = $1 AND puzzle_id = ANY($2)
            "#,
        )
        .bind(user_id)
        .bind(puzzle_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(ids)
    }
}
