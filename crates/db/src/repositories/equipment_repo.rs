//! Repository for the `equipment` table.
//!
//! `status` is never written independently: create derives it from the
//! initial `scrap_date`, and update callers pass a payload whose `status`
//! and `scrap_date` have already been reconciled by the lifecycle rules.

use gearguard_core::lifecycle::derive_equipment_status;
use gearguard_core::types::DbId;
use sqlx::PgPool;

use crate::models::equipment::{CreateEquipment, Equipment, UpdateEquipment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, serial_number, category_id, department_id, \
                        assigned_employee_id, location, purchase_date, warranty_expiry_date, \
                        maintenance_team_id, default_technician_id, status, assigned_date, \
                        scrap_date, notes";

/// Provides CRUD operations for equipment.
pub struct EquipmentRepo;

impl EquipmentRepo {
    /// Insert new equipment, returning the created row.
    ///
    /// Status is derived from `scrap_date` presence, not taken from the input.
    pub async fn create(pool: &PgPool, input: &CreateEquipment) -> Result<Equipment, sqlx::Error> {
        let status = derive_equipment_status(input.scrap_date).as_str();

        let query = format!(
            "INSERT INTO equipment (name, serial_number, category_id, department_id,
                                    assigned_employee_id, location, purchase_date,
                                    warranty_expiry_date, maintenance_team_id,
                                    default_technician_id, status, assigned_date,
                                    scrap_date, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(&input.name)
            .bind(&input.serial_number)
            .bind(input.category_id)
            .bind(input.department_id)
            .bind(input.assigned_employee_id)
            .bind(&input.location)
            .bind(input.purchase_date)
            .bind(input.warranty_expiry_date)
            .bind(input.maintenance_team_id)
            .bind(input.default_technician_id)
            .bind(status)
            .bind(input.assigned_date)
            .bind(input.scrap_date)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find equipment by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM equipment WHERE id = $1");
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find equipment by serial number.
    pub async fn find_by_serial_number(
        pool: &PgPool,
        serial_number: &str,
    ) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM equipment WHERE serial_number = $1");
        sqlx::query_as::<_, Equipment>(&query)
            .bind(serial_number)
            .fetch_optional(pool)
            .await
    }

    /// List all equipment ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Equipment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM equipment ORDER BY name");
        sqlx::query_as::<_, Equipment>(&query).fetch_all(pool).await
    }

    /// Update equipment. Only non-`None` fields in `input` are applied;
    /// `scrap_date` is tri-state (present-and-null clears the column).
    ///
    /// The caller must have reconciled `status` with `scrap_date` via the
    /// lifecycle rules before calling; this method persists both as given.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEquipment,
    ) -> Result<Option<Equipment>, sqlx::Error> {
        let scrap_date_present = input.scrap_date.is_some();
        let scrap_date = input.scrap_date.flatten();

        let query = format!(
            "UPDATE equipment SET
                name = COALESCE($2, name),
                serial_number = COALESCE($3, serial_number),
                category_id = COALESCE($4, category_id),
                department_id = COALESCE($5, department_id),
                assigned_employee_id = COALESCE($6, assigned_employee_id),
                location = COALESCE($7, location),
                purchase_date = COALESCE($8, purchase_date),
                warranty_expiry_date = COALESCE($9, warranty_expiry_date),
                maintenance_team_id = COALESCE($10, maintenance_team_id),
                default_technician_id = COALESCE($11, default_technician_id),
                status = COALESCE($12, status),
                scrap_date = CASE WHEN $13 THEN $14 ELSE scrap_date END,
                assigned_date = COALESCE($15, assigned_date),
                notes = COALESCE($16, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.serial_number)
            .bind(input.category_id)
            .bind(input.department_id)
            .bind(input.assigned_employee_id)
            .bind(&input.location)
            .bind(input.purchase_date)
            .bind(input.warranty_expiry_date)
            .bind(input.maintenance_team_id)
            .bind(input.default_technician_id)
            .bind(&input.status)
            .bind(scrap_date_present)
            .bind(scrap_date)
            .bind(input.assigned_date)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }
}
