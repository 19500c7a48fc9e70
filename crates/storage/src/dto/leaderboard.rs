use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct LeaderboardQuery {
    /// Number of top players to return.
    #[serde(default = "default_size")]
    pub size: u32,
    /// Number of players to return above and below the caller.
    #[serde(default = "default_range")]
    pub range: u32,
}

fn default_size() -> u32 {
    10
}

fn default_range() -> u32 {
    2
}

impl LeaderboardQuery {
    pub fn validate(&self) -> Result<(), String> {
        if self.size < 1 || self.size > 100 {
            return Err("size must be between 1 and 100".to_string());
        }
        if self.range > 50 {
            return Err("range must be <= 50".to_string());
        }
        Ok(())
    }
}

/// A single ranked row: one player's completion with its derived score and
/// 1-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ScoredEntry {
    pub user_id: i64,
    pub username: String,
    pub completion_time: i64,
    pub helps_used: i32,
    pub score: i64,
    pub position: u32,
}

/// Bounded leaderboard: the top block plus the caller's neighborhood when
/// they rank below it. `user` is `None` when the caller has no completion.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardView {
    pub top: Vec<ScoredEntry>,
    pub user: Option<ScoredEntry>,
    pub above_user: Vec<ScoredEntry>,
    pub below_user: Vec<ScoredEntry>,
}

impl LeaderboardView {
    pub fn empty() -> Self {
        Self {
            top: Vec::new(),
            user: None,
            above_user: Vec::new(),
            below_user: Vec::new(),
        }
    }
}
