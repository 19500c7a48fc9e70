use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Puzzle {
    pub puzzle_id: i64,
    pub level: i32,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub bin_values: Option<String>,
    pub solution: Option<String>,
    pub published: bool,
    pub created_at: chrono::NaiveDateTime,
}
