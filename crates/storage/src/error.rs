use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Assignment store error: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("Assignment store corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),

    #[error("Not found")]
    NotFound,

    #[error("Puzzle pool exhausted: needed {needed}, only {available} uncompleted puzzles left")]
    InsufficientPool { needed: u32, available: u32 },

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }
}
