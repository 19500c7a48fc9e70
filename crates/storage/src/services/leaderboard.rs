use sqlx::PgPool;

use crate::dto::leaderboard::{LeaderboardView, ScoredEntry};
use crate::error::Result;
use crate::models::CompletionRecord;
use crate::repository::completion::CompletionRepository;

/// Penalty weights used to derive a score from a completion.
#[derive(Debug, Clone, Copy)]
pub struct ScoreWeights {
    pub base_score: i64,
    pub points_lost_per_second: i64,
    pub points_lost_per_help: i64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            base_score: 1000,
            points_lost_per_second: 1,
            points_lost_per_help: 50,
        }
    }
}

impl ScoreWeights {
    /// Score for a single completion, floored at zero.
    pub fn score(&self, completion_time: i64, helps_used: i32) -> i64 {
        let raw = self.base_score
            - self.points_lost_per_second * completion_time
            - self.points_lost_per_help * i64::from(helps_used);
        raw.max(0)
    }
}

/// Ranked leaderboard for one puzzle, bounded to the top players plus the
/// reference user's neighborhood.
pub async fn get_leaderboard(
    pool: &PgPool,
    user_id: i64,
    puzzle_id: i64,
    weights: ScoreWeights,
    top_size: u32,
    neighbor_range: u32,
) -> Result<LeaderboardView> {
    let repo = CompletionRepository::new(pool);
    let records = repo.fetch_completions(puzzle_id).await?;

    let ranked = rank_completions(records, &weights);
    Ok(build_view(&ranked, user_id, top_size, neighbor_range))
}

/// Score every completion and assign positions 1..N by descending score.
/// Ties go to the earlier finisher, then the lower user id, so the order is
/// total and identical inputs always rank identically.
pub fn rank_completions(
    records: Vec<CompletionRecord>,
    weights: &ScoreWeights,
) -> Vec<ScoredEntry> {
    let mut scored: Vec<(i64, CompletionRecord)> = records
        .into_iter()
        .map(|record| (weights.score(record.completion_time, record.helps_used), record))
        .collect();

    scored.sort_by(|(score_a, a), (score_b, b)| {
        score_b
            .cmp(score_a)
            .then_with(|| a.completed_at.cmp(&b.completed_at))
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    scored
        .into_iter()
        .enumerate()
        .map(|(index, (score, record))| ScoredEntry {
            user_id: record.user_id,
            username: record.username,
            completion_time: record.completion_time,
            helps_used: record.helps_used,
            score,
            position: index as u32 + 1,
        })
        .collect()
}

/// Select the top block and, when the reference user sits below it, the
/// entries within `neighbor_range` positions on either side. Users inside
/// the top get no neighborhood; `above_user` never duplicates a top entry.
pub fn build_view(
    ranked: &[ScoredEntry],
    user_id: i64,
    top_size: u32,
    neighbor_range: u32,
) -> LeaderboardView {
    if ranked.is_empty() {
        return LeaderboardView::empty();
    }

    let user = ranked.iter().find(|e| e.user_id == user_id).cloned();
    let top: Vec<ScoredEntry> = ranked
        .iter()
        .filter(|e| e.position <= top_size)
        .cloned()
        .collect();

    let (above_user, below_user) = match &user {
        Some(entry) if entry.position > top_size => {
            let position = entry.position;
            let above = ranked
                .iter()
                .filter(|e| {
                    e.position < position
                        && e.position >= position.saturating_sub(neighbor_range)
                        && e.position > top_size
                })
                .cloned()
                .collect();
            let below = ranked
                .iter()
                .filter(|e| e.position > position && e.position <= position + neighbor_range)
                .cloned()
                .collect();
            (above, below)
        }
        _ => (Vec::new(), Vec::new()),
    };

    LeaderboardView {
        top,
        user,
        above_user,
        below_user,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn record(user_id: i64, completion_time: i64, helps_used: i32) -> CompletionRecord {
        record_at(user_id, completion_time, helps_used, 12, 0, 0)
    }

    fn record_at(
        user_id: i64,
        completion_time: i64,
        helps_used: i32,
        hour: u32,
        min: u32,
        sec: u32,
    ) -> CompletionRecord {
        CompletionRecord {
            user_id,
            username: format!("player{user_id}"),
            completion_time,
            helps_used,
            completed_at: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(hour, min, sec)
                .unwrap(),
        }
    }

    #[test]
    fn test_score_formula_and_floor() {
        let weights = ScoreWeights::default();
        assert_eq!(weights.score(100, 0), 900);
        assert_eq!(weights.score(200, 0), 800);
        assert_eq!(weights.score(300, 1), 650);
        // 1000 - 2000 - 100 would be negative
        assert_eq!(weights.score(2000, 2), 0);
    }

    #[test]
    fn test_positions_are_dense_and_ordered() {
        let records = vec![record(3, 300, 1), record(1, 100, 0), record(2, 200, 0)];
        let ranked = rank_completions(records, &ScoreWeights::default());

        let positions: Vec<u32> = ranked.iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);

        assert_eq!(ranked[0].user_id, 1);
        assert_eq!(ranked[0].score, 900);
        assert_eq!(ranked[1].user_id, 2);
        assert_eq!(ranked[1].score, 800);
        assert_eq!(ranked[2].user_id, 3);
        assert_eq!(ranked[2].score, 650);
    }

    #[test]
    fn test_ties_break_on_earlier_completion_then_user_id() {
        let records = vec![
            record_at(5, 100, 0, 14, 0, 0),
            record_at(4, 100, 0, 9, 30, 0),
            record_at(7, 100, 0, 9, 30, 0),
        ];
        let ranked = rank_completions(records, &ScoreWeights::default());

        let order: Vec<i64> = ranked.iter().map(|e| e.user_id).collect();
        assert_eq!(order, vec![4, 7, 5]);
    }

    #[test]
    fn test_empty_records_give_empty_view() {
        let ranked = rank_completions(Vec::new(), &ScoreWeights::default());
        let view = build_view(&ranked, 1, 10, 2);

        assert!(view.top.is_empty());
        assert!(view.user.is_none());
        assert!(view.above_user.is_empty());
        assert!(view.below_user.is_empty());
    }

    #[test]
    fn test_three_completions_all_land_in_top() {
        let records = vec![record(1, 100, 0), record(2, 200, 0), record(3, 300, 1)];
        let ranked = rank_completions(records, &ScoreWeights::default());

        for queried in [1, 2, 3] {
            let view = build_view(&ranked, queried, 10, 2);
            assert_eq!(view.top.len(), 3);
            assert!(view.above_user.is_empty());
            assert!(view.below_user.is_empty());
            assert_eq!(view.user.as_ref().unwrap().user_id, queried);
        }
    }

    #[test]
    fn test_user_without_completion_gets_top_only() {
        let records = vec![record(1, 100, 0), record(2, 200, 0)];
        let ranked = rank_completions(records, &ScoreWeights::default());
        let view = build_view(&ranked, 99, 10, 2);

        assert_eq!(view.top.len(), 2);
        assert!(view.user.is_none());
        assert!(view.above_user.is_empty());
        assert!(view.below_user.is_empty());
    }

    #[test]
    fn test_user_below_top_gets_neighborhood() {
        // 20 players, times 10s apart; user 15 sits at position 15
        let records: Vec<CompletionRecord> =
            (1..=20).map(|id| record(id, id * 10, 0)).collect();
        let ranked = rank_completions(records, &ScoreWeights::default());
        let view = build_view(&ranked, 15, 10, 2);

        let user = view.user.as_ref().unwrap();
        assert_eq!(user.position, 15);
        assert_eq!(view.top.len(), 10);

        let above: Vec<u32> = view.above_user.iter().map(|e| e.position).collect();
        let below: Vec<u32> = view.below_user.iter().map(|e| e.position).collect();
        assert_eq!(above, vec![13, 14]);
        assert_eq!(below, vec![16, 17]);
    }

    #[test]
    fn test_above_user_never_overlaps_top() {
        // user at position 11: the range [9, 10] overlaps the top block and
        // must be excluded from above_user
        let records: Vec<CompletionRecord> =
            (1..=12).map(|id| record(id, id * 10, 0)).collect();
        let ranked = rank_completions(records, &ScoreWeights::default());
        let view = build_view(&ranked, 11, 10, 2);

        assert_eq!(view.user.as_ref().unwrap().position, 11);
        assert!(view.above_user.is_empty());
        let below: Vec<u32> = view.below_user.iter().map(|e| e.position).collect();
        assert_eq!(below, vec![12]);

        let top_positions: Vec<u32> = view.top.iter().map(|e| e.position).collect();
        for entry in &view.above_user {
            assert!(!top_positions.contains(&entry.position));
        }
    }

    #[test]
    fn test_user_inside_top_gets_no_neighborhood() {
        let records: Vec<CompletionRecord> =
            (1..=20).map(|id| record(id, id * 10, 0)).collect();
        let ranked = rank_completions(records, &ScoreWeights::default());
        let view = build_view(&ranked, 5, 10, 2);

        assert_eq!(view.user.as_ref().unwrap().position, 5);
        assert!(view.above_user.is_empty());
        assert!(view.below_user.is_empty());
    }

    #[test]
    fn test_scores_never_negative() {
        let weights = ScoreWeights::default();
        let records = vec![record(1, 5000, 0), record(2, 10, 20)];
        let ranked = rank_completions(records, &weights);

        for entry in &ranked {
            assert!(entry.score >= 0);
        }
    }
}
