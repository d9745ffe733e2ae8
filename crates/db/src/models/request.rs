//! Maintenance request entity model and DTOs.

use gearguard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::double_option;

/// A maintenance request row from the `maintenance_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MaintenanceRequest {
    pub id: DbId,
    pub subject: String,
    pub description: String,
    pub request_type: String,
    pub equipment_id: Option<DbId>,
    pub work_center_id: Option<DbId>,
    pub maintenance_team_id: Option<DbId>,
    pub assigned_technician_id: Option<DbId>,
    pub scheduled_date: Option<Timestamp>,
    pub actual_start_date: Option<Timestamp>,
    pub completed_date: Option<Timestamp>,
    pub duration_hours: Option<i32>,
    pub priority: String,
    pub status: String,
    pub created_by: DbId,
    pub created_at: Timestamp,
}

/// Request plus its technician set, stitched from `request_technicians`.
///
/// `technician_ids` and `assigned_technician_id` are independent assignment
/// channels; they are only coupled by the default-technician seeding rule at
/// creation time. No ordering guarantee on `technician_ids`.
#[derive(Debug, Clone, Serialize)]
pub struct RequestResponse {
    #[serde(flatten)]
    pub request: MaintenanceRequest,
    pub technician_ids: Vec<DbId>,
}

/// DTO for creating a new request. `created_by` is server-assigned from the
/// authenticated user, never taken from the payload.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub subject: String,
    pub description: String,
    pub request_type: String,
    pub equipment_id: Option<DbId>,
    pub work_center_id: Option<DbId>,
    pub maintenance_team_id: Option<DbId>,
    pub assigned_technician_id: Option<DbId>,
    pub scheduled_date: Option<Timestamp>,
    pub actual_start_date: Option<Timestamp>,
    pub completed_date: Option<Timestamp>,
    pub duration_hours: Option<i32>,
    pub priority: Option<String>,
    pub technician_ids: Option<Vec<DbId>>,
}

/// DTO for updating a request.
///
/// `scheduled_date` is tri-state so the new -> in_progress auto-transition
/// can distinguish "set a date" from "clear it" from "left alone".
/// `technician_ids` present (even empty) replaces the join-row set wholesale;
/// omitted leaves it untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRequest {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub request_type: Option<String>,
    pub equipment_id: Option<DbId>,
    pub work_center_id: Option<DbId>,
    pub maintenance_team_id: Option<DbId>,
    pub assigned_technician_id: Option<DbId>,
    #[serde(default, deserialize_with = "double_option")]
    pub scheduled_date: Option<Option<Timestamp>>,
    pub actual_start_date: Option<Timestamp>,
    pub completed_date: Option<Timestamp>,
    pub duration_hours: Option<i32>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub technician_ids: Option<Vec<DbId>>,
}
