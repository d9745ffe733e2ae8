//! Repository for the `work_centers` table.

use gearguard_core::types::DbId;
use sqlx::PgPool;

use crate::models::work_center::{CreateWorkCenter, UpdateWorkCenter, WorkCenter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, code, tag, alternative_ids, cost_per_hour, capacity, \
                        time_efficiency, oee_target, status";

/// Provides CRUD operations for work centers.
pub struct WorkCenterRepo;

impl WorkCenterRepo {
    /// Insert a new work center, returning the created row. Unset numeric
    /// fields fall back to the column defaults.
    pub async fn create(pool: &PgPool, input: &CreateWorkCenter) -> Result<WorkCenter, sqlx::Error> {
        let query = format!(
            "INSERT INTO work_centers
                (name, code, tag, alternative_ids, cost_per_hour, capacity,
                 time_efficiency, oee_target)
             VALUES ($1, $2, $3, COALESCE($4, '{{}}'), COALESCE($5, 0), COALESCE($6, 1),
                     COALESCE($7, 100), COALESCE($8, 90))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkCenter>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.tag)
            .bind(&input.alternative_ids)
            .bind(input.cost_per_hour)
            .bind(input.capacity)
            .bind(input.time_efficiency)
            .bind(input.oee_target)
            .fetch_one(pool)
            .await
    }

    /// Find a work center by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WorkCenter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM work_centers WHERE id = $1");
        sqlx::query_as::<_, WorkCenter>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a work center by its unique code.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<WorkCenter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM work_centers WHERE code = $1");
        sqlx::query_as::<_, WorkCenter>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// List all work centers ordered by code.
    pub async fn list(pool: &PgPool) -> Result<Vec<WorkCenter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM work_centers ORDER BY code");
        sqlx::query_as::<_, WorkCenter>(&query).fetch_all(pool).await
    }

    /// Update a work center. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWorkCenter,
    ) -> Result<Option<WorkCenter>, sqlx::Error> {
        let query = format!(
            "UPDATE work_centers SET
                name = COALESCE($2, name),
                code = COALESCE($3, code),
                tag = COALESCE($4, tag),
                alternative_ids = COALESCE($5, alternative_ids),
                cost_per_hour = COALESCE($6, cost_per_hour),
                capacity = COALESCE($7, capacity),
                time_efficiency = COALESCE($8, time_efficiency),
                oee_target = COALESCE($9, oee_target),
                status = COALESCE($10, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkCenter>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.tag)
            .bind(&input.alternative_ids)
            .bind(input.cost_per_hour)
            .bind(input.capacity)
            .bind(input.time_efficiency)
            .bind(input.oee_target)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }
}
