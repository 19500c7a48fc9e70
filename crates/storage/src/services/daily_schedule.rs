use std::future::Future;

use chrono::{Datelike, Local, NaiveDate};
use sqlx::PgPool;
use tokio::sync::Mutex;

use crate::error::{Result, StorageError};
use crate::models::MonthlyAssignment;
use crate::repository::assignment::AssignmentStore;
use crate::repository::puzzle::PuzzleRepository;

/// Source of never-completed puzzle ids for monthly generation. The data
/// layer supplies the randomized order and may return fewer ids than asked
/// when the pool is running dry.
pub trait PuzzlePool {
    fn draw_uncompleted(&self, count: u32) -> impl Future<Output = Result<Vec<i64>>> + Send;
}

/// Production pool backed by the puzzles table.
pub struct DbPuzzlePool<'a> {
    pool: &'a PgPool,
}

impl<'a> DbPuzzlePool<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl PuzzlePool for DbPuzzlePool<'_> {
    async fn draw_uncompleted(&self, count: u32) -> Result<Vec<i64>> {
        PuzzleRepository::new(self.pool)
            .draw_uncompleted_ids(count)
            .await
    }
}

/// Maintains the persisted day → puzzle assignment for the current month and
/// resolves daily lookups against it.
///
/// The month's table is generated lazily, on the first lookup after a
/// rollover: the whole prior state is replaced, never merged. Regeneration
/// runs under a mutex with a second staleness check after acquisition, so
/// concurrent requests crossing a month boundary generate at most once.
pub struct DailyPuzzleScheduler<S> {
    store: S,
    regen: Mutex<()>,
}

impl<S: AssignmentStore> DailyPuzzleScheduler<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            regen: Mutex::new(()),
        }
    }

    /// Puzzle id assigned to `day` of the current month, or to today when
    /// `day` is `None`. Days after today are never revealed.
    pub async fn get_daily_puzzle_id<P: PuzzlePool>(
        &self,
        pool: &P,
        day: Option<u32>,
    ) -> Result<i64> {
        self.resolve(Local::now().date_naive(), day, pool).await
    }

    /// The full assignment for the current month, generating it if stale.
    pub async fn current_assignment<P: PuzzlePool>(&self, pool: &P) -> Result<MonthlyAssignment> {
        self.assignment_for(Local::now().date_naive(), pool).await
    }

    async fn resolve<P: PuzzlePool>(
        &self,
        today: NaiveDate,
        day: Option<u32>,
        pool: &P,
    ) -> Result<i64> {
        let requested_day = day.unwrap_or_else(|| today.day());

        // Future days stay hidden, and must not trigger generation either.
        if requested_day > today.day() {
            return Err(StorageError::NotFound);
        }

        let assignment = self.assignment_for(today, pool).await?;
        assignment
            .puzzle_for_day(requested_day)
            .ok_or(StorageError::NotFound)
    }

    async fn assignment_for<P: PuzzlePool>(
        &self,
        today: NaiveDate,
        pool: &P,
    ) -> Result<MonthlyAssignment> {
        let month = month_key(today);

        let assignment = self.store.load()?;
        if assignment.is_for_month(&month) {
            return Ok(assignment);
        }

        // Month rollover: one request regenerates, the rest re-read the
        // freshly saved state once the lock frees up.
        let _guard = self.regen.lock().await;

        let assignment = self.store.load()?;
        if assignment.is_for_month(&month) {
            return Ok(assignment);
        }

        let last_day = days_in_month(today.year(), today.month());
        let ids = pool.draw_uncompleted(last_day).await?;
        let fresh = generate_assignment(&month, last_day, ids)?;

        self.store.save(&fresh)?;

        Ok(fresh)
    }
}

/// Build a full month's assignment from pre-drawn ids. Fails without
/// side effects when the pool cannot cover every day; a truncated month
/// would be indistinguishable from future days for callers.
fn generate_assignment(month: &str, last_day: u32, ids: Vec<i64>) -> Result<MonthlyAssignment> {
    if (ids.len() as u32) < last_day {
        return Err(StorageError::InsufficientPool {
            needed: last_day,
            available: ids.len() as u32,
        });
    }

    let grids = (1..=last_day)
        .zip(ids)
        .map(|(day, puzzle_id)| (day.to_string(), puzzle_id))
        .collect();

    Ok(MonthlyAssignment {
        current_month: month.to_string(),
        grids,
    })
}

/// Month identifier in the persisted `"YYYY-M"` form (month unpadded).
pub fn month_key(date: NaiveDate) -> String {
    format!("{}-{}", date.year(), date.month())
}

/// Number of days in the given month, Gregorian calendar.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 => {
            if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Default)]
    struct MemoryStore {
        inner: StdMutex<MonthlyAssignment>,
        saves: AtomicUsize,
    }

    impl MemoryStore {
        fn seeded(assignment: MonthlyAssignment) -> Self {
            Self {
                inner: StdMutex::new(assignment),
                saves: AtomicUsize::new(0),
            }
        }

        fn save_count(&self) -> usize {
            self.saves.load(Ordering::SeqCst)
        }
    }

    impl AssignmentStore for MemoryStore {
        fn load(&self) -> Result<MonthlyAssignment> {
            Ok(self.inner.lock().unwrap().clone())
        }

        fn save(&self, assignment: &MonthlyAssignment) -> Result<()> {
            *self.inner.lock().unwrap() = assignment.clone();
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FixedPool {
        ids: Vec<i64>,
        draws: AtomicUsize,
    }

    impl FixedPool {
        fn new(ids: Vec<i64>) -> Self {
            Self {
                ids,
                draws: AtomicUsize::new(0),
            }
        }

        fn with_capacity(capacity: u32) -> Self {
            Self::new((1..=i64::from(capacity)).map(|id| id * 100).collect())
        }

        fn draw_count(&self) -> usize {
            self.draws.load(Ordering::SeqCst)
        }
    }

    impl PuzzlePool for FixedPool {
        async fn draw_uncompleted(&self, count: u32) -> Result<Vec<i64>> {
            self.draws.fetch_add(1, Ordering::SeqCst);
            Ok(self.ids.iter().copied().take(count as usize).collect())
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
    }

    #[test]
    fn test_month_key_is_unpadded() {
        assert_eq!(month_key(date(2025, 6, 10)), "2025-6");
        assert_eq!(month_key(date(2025, 11, 1)), "2025-11");
    }

    #[tokio::test]
    async fn test_future_day_returns_not_found_without_generating() {
        let scheduler = DailyPuzzleScheduler::new(MemoryStore::default());
        let pool = FixedPool::with_capacity(31);

        let result = scheduler.resolve(date(2025, 6, 10), Some(15), &pool).await;

        assert!(matches!(result, Err(StorageError::NotFound)));
        assert_eq!(pool.draw_count(), 0);
        assert_eq!(scheduler.store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_first_lookup_generates_full_month() {
        let scheduler = DailyPuzzleScheduler::new(MemoryStore::default());
        let pool = FixedPool::with_capacity(30);

        let id = scheduler
            .resolve(date(2025, 6, 10), None, &pool)
            .await
            .unwrap();

        let saved = scheduler.store.load().unwrap();
        assert_eq!(saved.current_month, "2025-6");
        assert_eq!(saved.grids.len(), 30);
        assert_eq!(saved.puzzle_for_day(10), Some(id));
    }

    #[tokio::test]
    async fn test_same_month_lookups_are_idempotent() {
        let scheduler = DailyPuzzleScheduler::new(MemoryStore::default());
        let pool = FixedPool::with_capacity(30);
        let today = date(2025, 6, 10);

        let first = scheduler.resolve(today, Some(7), &pool).await.unwrap();
        let second = scheduler.resolve(today, Some(7), &pool).await.unwrap();

        assert_eq!(first, second);
        // generation happened exactly once; later lookups only read
        assert_eq!(pool.draw_count(), 1);
        assert_eq!(scheduler.store.save_count(), 1);
    }

    #[tokio::test]
    async fn test_assigned_ids_are_distinct_across_days() {
        let scheduler = DailyPuzzleScheduler::new(MemoryStore::default());
        let pool = FixedPool::with_capacity(31);

        scheduler
            .resolve(date(2025, 7, 31), None, &pool)
            .await
            .unwrap();

        let saved = scheduler.store.load().unwrap();
        let mut ids: Vec<i64> = saved.grids.values().copied().collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 31);
    }

    #[tokio::test]
    async fn test_insufficient_pool_fails_and_preserves_prior_state() {
        let mut prior = MonthlyAssignment::empty();
        prior.current_month = "2025-1".to_string();
        prior.grids.insert("1".to_string(), 111);

        let scheduler = DailyPuzzleScheduler::new(MemoryStore::seeded(prior.clone()));
        // non-leap February needs 28, only 20 available
        let pool = FixedPool::with_capacity(20);

        let result = scheduler.resolve(date(2025, 2, 10), None, &pool).await;

        assert!(matches!(
            result,
            Err(StorageError::InsufficientPool {
                needed: 28,
                available: 20
            })
        ));
        assert_eq!(scheduler.store.save_count(), 0);
        assert_eq!(scheduler.store.load().unwrap(), prior);
    }

    #[tokio::test]
    async fn test_leap_year_february_generates_29_days() {
        let scheduler = DailyPuzzleScheduler::new(MemoryStore::default());
        let pool = FixedPool::with_capacity(29);

        scheduler
            .resolve(date(2024, 2, 10), None, &pool)
            .await
            .unwrap();

        let saved = scheduler.store.load().unwrap();
        assert_eq!(saved.current_month, "2024-2");
        assert_eq!(saved.grids.len(), 29);
        assert!(saved.puzzle_for_day(29).is_some());
    }

    #[tokio::test]
    async fn test_non_leap_february_generates_28_days() {
        let scheduler = DailyPuzzleScheduler::new(MemoryStore::default());
        let pool = FixedPool::with_capacity(31);

        scheduler
            .resolve(date(2025, 2, 10), None, &pool)
            .await
            .unwrap();

        let saved = scheduler.store.load().unwrap();
        assert_eq!(saved.grids.len(), 28);
        assert!(saved.puzzle_for_day(29).is_none());
    }

    #[tokio::test]
    async fn test_rollover_replaces_prior_month_wholesale() {
        let mut prior = MonthlyAssignment::empty();
        prior.current_month = "2025-5".to_string();
        for day in 1..=31 {
            prior.grids.insert(day.to_string(), i64::from(day) + 100_000);
        }

        let scheduler = DailyPuzzleScheduler::new(MemoryStore::seeded(prior));
        let pool = FixedPool::with_capacity(30);

        scheduler
            .resolve(date(2025, 6, 15), None, &pool)
            .await
            .unwrap();

        let saved = scheduler.store.load().unwrap();
        assert_eq!(saved.current_month, "2025-6");
        assert_eq!(saved.grids.len(), 30);
        // no leftover day 31 from the 31-day prior month
        assert!(saved.puzzle_for_day(31).is_none());
        assert!(saved.grids.values().all(|id| *id < 100_000));
    }

    #[tokio::test]
    async fn test_day_missing_from_generated_range_is_not_found() {
        let mut partial = MonthlyAssignment::empty();
        partial.current_month = "2025-6".to_string();
        partial.grids.insert("1".to_string(), 42);

        let scheduler = DailyPuzzleScheduler::new(MemoryStore::seeded(partial));
        let pool = FixedPool::with_capacity(30);

        let result = scheduler.resolve(date(2025, 6, 10), Some(5), &pool).await;

        assert!(matches!(result, Err(StorageError::NotFound)));
        // state matched the current month, so no regeneration was attempted
        assert_eq!(pool.draw_count(), 0);
    }

    #[tokio::test]
    async fn test_default_day_is_today() {
        let scheduler = DailyPuzzleScheduler::new(MemoryStore::default());
        let pool = FixedPool::with_capacity(30);
        let today = date(2025, 6, 17);

        let by_default = scheduler.resolve(today, None, &pool).await.unwrap();
        let explicit = scheduler.resolve(today, Some(17), &pool).await.unwrap();

        assert_eq!(by_default, explicit);
    }
}
