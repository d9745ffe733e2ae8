//! Repository for the `activity_logs` table.
//!
//! Append-only: there are no update or delete operations.

use sqlx::PgPool;

use crate::models::activity_log::{ActivityLog, CreateActivityLog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, reference_type, reference_id, action, performed_by, timestamp";

/// Provides append and query operations for the audit trail.
pub struct ActivityLogRepo;

impl ActivityLogRepo {
    /// Append a new log entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateActivityLog,
    ) -> Result<ActivityLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_logs (reference_type, reference_id, action, performed_by)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(input.reference_type)
            .bind(input.reference_id)
            .bind(&input.action)
            .bind(input.performed_by)
            .fetch_one(pool)
            .await
    }

    /// List all log entries, most recent first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activity_logs ORDER BY timestamp DESC, id DESC");
        sqlx::query_as::<_, ActivityLog>(&query).fetch_all(pool).await
    }
}
