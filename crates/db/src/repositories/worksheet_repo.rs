//! Repository for the `worksheets` table.

use gearguard_core::types::DbId;
use sqlx::PgPool;

use crate::models::worksheet::{CreateWorksheet, Worksheet};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, request_id, user_id, start_time, end_time, description";

/// Provides CRUD operations for worksheet time entries.
pub struct WorksheetRepo;

impl WorksheetRepo {
    /// Insert a new worksheet entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        request_id: DbId,
        user_id: DbId,
        input: &CreateWorksheet,
    ) -> Result<Worksheet, sqlx::Error> {
        let query = format!(
            "INSERT INTO worksheets (request_id, user_id, start_time, end_time, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Worksheet>(&query)
            .bind(request_id)
            .bind(user_id)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// All worksheet entries for a request, oldest first.
    pub async fn list_for_request(
        pool: &PgPool,
        request_id: DbId,
    ) -> Result<Vec<Worksheet>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM worksheets WHERE request_id = $1 ORDER BY start_time"
        );
        sqlx::query_as::<_, Worksheet>(&query)
            .bind(request_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a worksheet entry. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM worksheets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
