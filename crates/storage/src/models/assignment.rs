use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Persisted day → puzzle assignment for a single month.
///
/// `current_month` uses the `"YYYY-M"` form (month unpadded) and an empty
/// string before the first generation. Days are stored as string keys so the
/// value round-trips the JSON file layout unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAssignment {
    pub current_month: String,
    pub grids: BTreeMap<String, i64>,
}

impl MonthlyAssignment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_for_month(&self, month: &str) -> bool {
        self.current_month == month
    }

    pub fn puzzle_for_day(&self, day: u32) -> Option<i64> {
        self.grids.get(&day.to_string()).copied()
    }
}
