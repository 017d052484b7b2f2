use chrono::Local;
use rust_decimal::Decimal;
use sqlx::PgPool;
use storage::error::Result;
use storage::models::FitnessLogEntry;
use storage::repository::fitness_log::FitnessLogRepository;
use storage::services::time_window::Period;

/// Records a new log entry, numbering it within today's sets for the
/// same user and action.
pub async fn create_log(
    pool: &PgPool,
    user_id: &str,
    action: &str,
    reps: i32,
    weight: Decimal,
) -> Result<FitnessLogEntry> {
    let repo = FitnessLogRepository::new(pool);
    let today = Local::now().date_naive();

    // Counting and inserting run as two separate statements, with no
    // transaction around them: concurrent requests for the same
    // (user_id, action, day) can read the same count and store duplicate
    // set numbers.
    let count = repo.count_for_day(user_id, action, today).await?;
    let sets = (count + 1) as i32;

    let id = repo.insert(user_id, action, reps, weight, sets).await?;
    repo.find_by_id(id).await
}

/// Returns all of a user's entries from the start of the given period
/// onwards, newest first.
pub async fn list_logs_for_period(
    pool: &PgPool,
    user_id: &str,
    period: Period,
) -> Result<Vec<FitnessLogEntry>> {
    let repo = FitnessLogRepository::new(pool);
    let start = period.start_of(Local::now().naive_local());
    repo.list_since(user_id, start).await
}

/// Removes the user's most recent entry. Fails with `NotFound` when the
/// user has no entries at all.
pub async fn delete_last_log(pool: &PgPool, user_id: &str) -> Result<()> {
    let repo = FitnessLogRepository::new(pool);
    let latest = repo.find_latest(user_id).await?;
    repo.delete_by_id(latest.id).await
}
