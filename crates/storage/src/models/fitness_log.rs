use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One persisted exercise entry. Rows are created, optionally deleted, and
/// never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FitnessLogEntry {
    pub id: i64,
    pub user_id: String,
    pub action: String,
    pub reps: i32,
    pub weight: Decimal,
    /// 1-based ordinal among same-day entries for (user_id, action),
    /// assigned at insert time and never renumbered.
    pub sets: i32,
    pub created_at: chrono::NaiveDateTime,
}
