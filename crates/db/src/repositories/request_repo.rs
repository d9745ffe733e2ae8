//! Repository for the `maintenance_requests` table, the `request_technicians`
//! join table, and the request -> equipment scrap cascade.
//!
//! The cascade runs in the same transaction as the request update: a request
//! can never be persisted as `scrap` while the cascade to its equipment is
//! lost. Join-row replacement is wholesale delete-then-reinsert.

use gearguard_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::request::{CreateRequest, MaintenanceRequest, UpdateRequest};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, subject, description, request_type, equipment_id, work_center_id, \
                        maintenance_team_id, assigned_technician_id, scheduled_date, \
                        actual_start_date, completed_date, duration_hours, priority, status, \
                        created_by, created_at";

/// Provides CRUD operations for maintenance requests.
pub struct RequestRepo;

impl RequestRepo {
    /// Insert a new request with its technician set, returning the created
    /// row. Requests always start in status `new`; the caller has already
    /// resolved team/technician defaults into `input` and `technician_ids`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRequest,
        created_by: DbId,
        technician_ids: &[DbId],
    ) -> Result<MaintenanceRequest, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO maintenance_requests
                (subject, description, request_type, equipment_id, work_center_id,
                 maintenance_team_id, assigned_technician_id, scheduled_date,
                 actual_start_date, completed_date, duration_hours, priority, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, COALESCE($12, 'medium'), $13)
             RETURNING {COLUMNS}"
        );
        let request = sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(&input.subject)
            .bind(&input.description)
            .bind(&input.request_type)
            .bind(input.equipment_id)
            .bind(input.work_center_id)
            .bind(input.maintenance_team_id)
            .bind(input.assigned_technician_id)
            .bind(input.scheduled_date)
            .bind(input.actual_start_date)
            .bind(input.completed_date)
            .bind(input.duration_hours)
            .bind(&input.priority)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        insert_technicians(&mut *tx, request.id, technician_ids).await?;

        tx.commit().await?;
        Ok(request)
    }

    /// Find a request by internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MaintenanceRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM maintenance_requests WHERE id = $1");
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all requests ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<MaintenanceRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM maintenance_requests ORDER BY created_at DESC");
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a request. Only non-`None` fields in `input` are applied;
    /// `scheduled_date` is tri-state (present-and-null clears the column).
    ///
    /// `status` is the effective status resolved by the lifecycle rules and
    /// is always written. `technician_ids` present replaces the join-row set
    /// wholesale; `None` leaves it untouched. When `scrap_equipment_id` is
    /// set, the referenced equipment is scrapped (status + scrap_date) in the
    /// same transaction.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRequest,
        status: &str,
        technician_ids: Option<&[DbId]>,
        scrap_equipment_id: Option<DbId>,
    ) -> Result<Option<MaintenanceRequest>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let scheduled_date_present = input.scheduled_date.is_some();
        let scheduled_date = input.scheduled_date.flatten();

        let query = format!(
            "UPDATE maintenance_requests SET
                subject = COALESCE($2, subject),
                description = COALESCE($3, description),
                request_type = COALESCE($4, request_type),
                equipment_id = COALESCE($5, equipment_id),
                work_center_id = COALESCE($6, work_center_id),
                maintenance_team_id = COALESCE($7, maintenance_team_id),
                assigned_technician_id = COALESCE($8, assigned_technician_id),
                scheduled_date = CASE WHEN $9 THEN $10 ELSE scheduled_date END,
                actual_start_date = COALESCE($11, actual_start_date),
                completed_date = COALESCE($12, completed_date),
                duration_hours = COALESCE($13, duration_hours),
                priority = COALESCE($14, priority),
                status = $15
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let request = sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(id)
            .bind(&input.subject)
            .bind(&input.description)
            .bind(&input.request_type)
            .bind(input.equipment_id)
            .bind(input.work_center_id)
            .bind(input.maintenance_team_id)
            .bind(input.assigned_technician_id)
            .bind(scheduled_date_present)
            .bind(scheduled_date)
            .bind(input.actual_start_date)
            .bind(input.completed_date)
            .bind(input.duration_hours)
            .bind(&input.priority)
            .bind(status)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(request) = request else {
            return Ok(None);
        };

        if let Some(technician_ids) = technician_ids {
            sqlx::query("DELETE FROM request_technicians WHERE request_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            insert_technicians(&mut *tx, id, technician_ids).await?;
        }

        if let Some(equipment_id) = scrap_equipment_id {
            sqlx::query(
                "UPDATE equipment SET status = 'scrapped', scrap_date = NOW()
                 WHERE id = $1 AND scrap_date IS NULL",
            )
            .bind(equipment_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(Some(request))
    }

    /// Technician ids assigned to a request. No ordering guarantee.
    pub async fn technician_ids(pool: &PgPool, request_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> =
            sqlx::query_as("SELECT technician_id FROM request_technicians WHERE request_id = $1")
                .bind(request_id)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(technician_id,)| technician_id).collect())
    }

    /// All `(request_id, technician_id)` pairs, for stitching request lists.
    pub async fn assignments(pool: &PgPool) -> Result<Vec<(DbId, DbId)>, sqlx::Error> {
        sqlx::query_as("SELECT request_id, technician_id FROM request_technicians")
            .fetch_all(pool)
            .await
    }
}

/// Insert one join row per technician id within the caller's transaction.
async fn insert_technicians(
    tx: &mut PgConnection,
    request_id: DbId,
    technician_ids: &[DbId],
) -> Result<(), sqlx::Error> {
    for technician_id in technician_ids {
        sqlx::query("INSERT INTO request_technicians (request_id, technician_id) VALUES ($1, $2)")
            .bind(request_id)
            .bind(technician_id)
            .execute(&mut *tx)
            .await?;
    }
    Ok(())
}
