//! Equipment entity model and DTOs.

use chrono::NaiveDate;
use gearguard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::double_option;

/// An equipment row from the `equipment` table.
///
/// `status` is derived from `scrap_date` presence at the application layer;
/// the two are never allowed to disagree.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Equipment {
    pub id: DbId,
    pub name: String,
    pub serial_number: String,
    pub category_id: DbId,
    pub department_id: Option<DbId>,
    pub assigned_employee_id: Option<DbId>,
    pub location: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry_date: Option<NaiveDate>,
    pub maintenance_team_id: Option<DbId>,
    pub default_technician_id: Option<DbId>,
    pub status: String,
    pub assigned_date: Option<Timestamp>,
    pub scrap_date: Option<Timestamp>,
    pub notes: Option<String>,
}

/// DTO for creating new equipment. Status is derived from `scrap_date`.
#[derive(Debug, Deserialize)]
pub struct CreateEquipment {
    pub name: String,
    pub serial_number: String,
    pub category_id: DbId,
    pub department_id: Option<DbId>,
    pub assigned_employee_id: Option<DbId>,
    pub location: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry_date: Option<NaiveDate>,
    pub maintenance_team_id: Option<DbId>,
    pub default_technician_id: Option<DbId>,
    pub assigned_date: Option<Timestamp>,
    pub scrap_date: Option<Timestamp>,
    pub notes: Option<String>,
}

/// DTO for updating equipment.
///
/// `scrap_date` and `status` are tri-state: omitted fields leave the stored
/// value untouched, and whichever of the two is present drives the
/// scrap/reactivate derivation (the other is recomputed to match).
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEquipment {
    pub name: Option<String>,
    pub serial_number: Option<String>,
    pub category_id: Option<DbId>,
    pub department_id: Option<DbId>,
    pub assigned_employee_id: Option<DbId>,
    pub location: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry_date: Option<NaiveDate>,
    pub maintenance_team_id: Option<DbId>,
    pub default_technician_id: Option<DbId>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub scrap_date: Option<Option<Timestamp>>,
    pub assigned_date: Option<Timestamp>,
    pub notes: Option<String>,
}
