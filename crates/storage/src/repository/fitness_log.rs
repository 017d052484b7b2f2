use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::error::{Result, StorageError};
use crate::models::FitnessLogEntry;
use crate::services::time_window;

pub struct FitnessLogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FitnessLogRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Count entries for (user, exercise) whose `created_at` falls on `day`.
    pub async fn count_for_day(&self, user_id: &str, action: &str, day: NaiveDate) -> Result<i64> {
        let (start, end) = time_window::day_bounds(day);

        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM fitness_logs
            WHERE user_id = $1 AND action = $2 AND created_at >= $3 AND created_at < $4
            "#,
        )
        .bind(user_id)
        .bind(action)
        .bind(start)
        .bind(end)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Insert a new entry; `id` and `created_at` are assigned by the store.
    /// Returns the assigned id.
    pub async fn insert(
        &self,
        user_id: &str,
        action: &str,
        reps: i32,
        weight: Decimal,
        sets: i32,
    ) -> Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO fitness_logs (user_id, action, reps, weight, sets)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(action)
        .bind(reps)
        .bind(weight)
        .bind(sets)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Fetch one entry by id
    pub async fn find_by_id(&self, id: i64) -> Result<FitnessLogEntry> {
        sqlx::query_as::<_, FitnessLogEntry>(
            r#"
            SELECT id, user_id, action, reps, weight, sets, created_at
            FROM fitness_logs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// All entries for a user from `start` onwards, most recent first.
    pub async fn list_since(
        &self,
        user_id: &str,
        start: NaiveDateTime,
    ) -> Result<Vec<FitnessLogEntry>> {
        let entries = sqlx::query_as::<_, FitnessLogEntry>(
            r#"
            SELECT id, user_id, action, reps, weight, sets, created_at
            FROM fitness_logs
            WHERE user_id = $1 AND created_at >= $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    /// The user's most recent entry. Rows sharing the same `created_at` tie
    /// arbitrarily; there is no secondary ordering key.
    pub async fn find_latest(&self, user_id: &str) -> Result<FitnessLogEntry> {
        sqlx::query_as::<_, FitnessLogEntry>(
            r#"
            SELECT id, user_id, action, reps, weight, sets, created_at
            FROM fitness_logs
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Delete one entry by id. Existence is established by the preceding
    /// lookup, so an already-gone row is not an error here.
    pub async fn delete_by_id(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM fitness_logs WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    // Seeds a row with an explicit timestamp so day bucketing and ordering
    // assertions do not depend on the wall clock.
    async fn insert_at(
        pool: &PgPool,
        user_id: &str,
        action: &str,
        sets: i32,
        created_at: NaiveDateTime,
    ) -> i64 {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO fitness_logs (user_id, action, reps, weight, sets, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(action)
        .bind(10)
        .bind(Decimal::from(50))
        .bind(sets)
        .bind(created_at)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[sqlx::test]
    #[ignore] // Only run when PostgreSQL is running
    async fn test_insert_then_read_back_by_id(pool: PgPool) {
        let repo = FitnessLogRepository::new(&pool);

        let id = repo
            .insert("1", "squat", 10, Decimal::from(50), 1)
            .await
            .unwrap();
        let entry = repo.find_by_id(id).await.unwrap();

        assert_eq!(entry.id, id);
        assert_eq!(entry.user_id, "1");
        assert_eq!(entry.action, "squat");
        assert_eq!(entry.reps, 10);
        assert_eq!(entry.weight, Decimal::from(50));
        assert_eq!(entry.sets, 1);

        let missing = repo.find_by_id(id + 1).await;
        assert!(matches!(missing, Err(StorageError::NotFound)));
    }

    #[sqlx::test]
    #[ignore] // Only run when PostgreSQL is running
    async fn test_count_for_day_buckets_by_user_action_and_day(pool: PgPool) {
        insert_at(&pool, "1", "squat", 1, at(2024, 6, 12, 0, 0)).await;
        insert_at(&pool, "1", "squat", 2, at(2024, 6, 12, 23, 59)).await;
        insert_at(&pool, "1", "squat", 1, at(2024, 6, 13, 0, 0)).await;
        insert_at(&pool, "1", "bench", 1, at(2024, 6, 12, 9, 0)).await;
        insert_at(&pool, "2", "squat", 1, at(2024, 6, 12, 9, 0)).await;

        let repo = FitnessLogRepository::new(&pool);
        let day = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();

        // Midnight is inclusive, the next midnight is not.
        assert_eq!(repo.count_for_day("1", "squat", day).await.unwrap(), 2);
        assert_eq!(
            repo.count_for_day("1", "squat", day.succ_opt().unwrap())
                .await
                .unwrap(),
            1
        );
        assert_eq!(repo.count_for_day("1", "bench", day).await.unwrap(), 1);
        assert_eq!(repo.count_for_day("2", "squat", day).await.unwrap(), 1);
        assert_eq!(repo.count_for_day("3", "squat", day).await.unwrap(), 0);
    }

    #[sqlx::test]
    #[ignore] // Only run when PostgreSQL is running
    async fn test_set_numbers_count_up_within_a_day_and_reset(pool: PgPool) {
        let repo = FitnessLogRepository::new(&pool);
        let day = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();

        // The writer flow: count the existing same-day rows, store count + 1.
        for nth in 1..=3i64 {
            let count = repo.count_for_day("1", "squat", day).await.unwrap();
            assert_eq!(count, nth - 1);
            insert_at(
                &pool,
                "1",
                "squat",
                (count + 1) as i32,
                at(2024, 6, 12, 8 + nth as u32, 0),
            )
            .await;
        }

        let entries = repo.list_since("1", at(2024, 6, 12, 0, 0)).await.unwrap();
        let sets: Vec<i32> = entries.iter().rev().map(|e| e.sets).collect();
        assert_eq!(sets, vec![1, 2, 3]);

        // A different exercise and the next day both start over at 1.
        assert_eq!(repo.count_for_day("1", "bench", day).await.unwrap(), 0);
        assert_eq!(
            repo.count_for_day("1", "squat", day.succ_opt().unwrap())
                .await
                .unwrap(),
            0
        );
    }

    #[sqlx::test]
    #[ignore] // Only run when PostgreSQL is running
    async fn test_list_since_filters_and_orders_newest_first(pool: PgPool) {
        insert_at(&pool, "1", "squat", 1, at(2024, 6, 11, 18, 0)).await;
        let mid = insert_at(&pool, "1", "squat", 1, at(2024, 6, 12, 8, 0)).await;
        let newest = insert_at(&pool, "1", "bench", 1, at(2024, 6, 12, 12, 0)).await;
        insert_at(&pool, "2", "squat", 1, at(2024, 6, 12, 9, 0)).await;

        let repo = FitnessLogRepository::new(&pool);

        let entries = repo.list_since("1", at(2024, 6, 12, 0, 0)).await.unwrap();
        let ids: Vec<i64> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![newest, mid]);
        assert!(entries.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        let all = repo.list_since("1", at(2024, 6, 11, 0, 0)).await.unwrap();
        assert_eq!(all.len(), 3);

        let none = repo.list_since("3", at(2024, 6, 12, 0, 0)).await.unwrap();
        assert!(none.is_empty());
    }

    #[sqlx::test]
    #[ignore] // Only run when PostgreSQL is running
    async fn test_delete_removes_exactly_the_latest_entry(pool: PgPool) {
        let first = insert_at(&pool, "1", "squat", 1, at(2024, 6, 12, 8, 0)).await;
        let last = insert_at(&pool, "1", "squat", 2, at(2024, 6, 12, 10, 0)).await;

        let repo = FitnessLogRepository::new(&pool);

        let latest = repo.find_latest("1").await.unwrap();
        assert_eq!(latest.id, last);

        repo.delete_by_id(latest.id).await.unwrap();

        // Exactly one row is gone and the earlier entry keeps its set number.
        let remaining = repo.list_since("1", at(2024, 6, 12, 0, 0)).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, first);
        assert_eq!(remaining[0].sets, 1);

        let latest_now = repo.find_latest("1").await.unwrap();
        assert_eq!(latest_now.id, first);
    }

    #[sqlx::test]
    #[ignore] // Only run when PostgreSQL is running
    async fn test_find_latest_on_unknown_user_is_not_found(pool: PgPool) {
        let repo = FitnessLogRepository::new(&pool);
        let result = repo.find_latest("1").await;
        assert!(matches!(result, Err(StorageError::NotFound)));
    }
}
