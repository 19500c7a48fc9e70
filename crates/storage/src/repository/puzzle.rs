use sqlx::{PgPool, QueryBuilder};

use crate::dto::puzzle::PuzzleListFilter;
use crate::error::{Result, StorageError};
use crate::models::Puzzle;

pub struct PuzzleRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PuzzleRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List published puzzles, newest first, with optional level filter.
    pub async fn list(&self, filter: &PuzzleListFilter) -> Result<(Vec<Puzzle>, i64)> {
        let offset = filter.pagination.offset() as i64;
        let limit = filter.pagination.limit() as i64;

        let total_items = self.count(filter).await?;
        let puzzles = self.fetch_page(filter, offset, limit).await?;

        Ok((puzzles, total_items))
    }

    async fn count(&self, filter: &PuzzleListFilter) -> Result<i64> {
        let mut query = QueryBuilder::new(
            r#"
            SELECT COUNT(*)
            FROM puzzles
            WHERE published = true
            "#,
        );

        if let Some(level) = filter.level {
            query.push(" AND level = ");
            query.push_bind(level);
        }

        let count = query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    async fn fetch_page(
        &self,
        filter: &PuzzleListFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Puzzle>> {
        let mut query = QueryBuilder::new(
            r#"
            SELECT puzzle_id, level, width, height, bin_values, solution, published, created_at
            FROM puzzles
            WHERE published = true
            "#,
        );

        if let Some(level) = filter.level {
            query.push(" AND level = ");
            query.push_bind(level);
        }

        query.push(" ORDER BY puzzle_id DESC LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind(offset);

        let puzzles: Vec<Puzzle> = query.build_query_as().fetch_all(self.pool).await?;

        Ok(puzzles)
    }

    /// Find a puzzle by id.
    pub async fn find_by_id(&self, puzzle_id: i64) -> Result<Puzzle> {
        let puzzle = sqlx::query_as::<_, Puzzle>(
            r#"
            SELECT puzzle_id, level, width, height, bin_values, solution, published, created_at
            FROM puzzles
            WHERE puzzle_id = $1
            "#,
        )
        .bind(puzzle_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(puzzle)
    }

    /// Draw up to `count` puzzles that no user has completed yet, in random
    /// order. Returns fewer ids than asked when the pool is running dry.
    pub async fn draw_uncompleted_ids(&self, count: u32) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT p.puzzle_id
            FROM puzzles p
            LEFT JOIN completions c ON c.puzzle_id = p.puzzle_id
            WHERE c.puzzle_id IS NULL
            ORDER BY random()
            LIMIT $1
            "#,
        )
        .bind(i64::from(count))
        .fetch_all(self.pool)
        .await?;

        Ok(ids)
    }
}
