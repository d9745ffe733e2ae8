//! Work center entity model and DTOs.

use gearguard_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A work center row from the `work_centers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkCenter {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub tag: Option<String>,
    /// Ids of alternative work centers that can take over this one's load.
    pub alternative_ids: Vec<DbId>,
    pub cost_per_hour: f64,
    pub capacity: i32,
    /// Time efficiency in percent.
    pub time_efficiency: f64,
    /// Overall Equipment Effectiveness target in percent.
    pub oee_target: f64,
    pub status: String,
}

/// DTO for creating a new work center.
#[derive(Debug, Deserialize)]
pub struct CreateWorkCenter {
    pub name: String,
    pub code: String,
    pub tag: Option<String>,
    pub alternative_ids: Option<Vec<DbId>>,
    pub cost_per_hour: Option<f64>,
    pub capacity: Option<i32>,
    pub time_efficiency: Option<f64>,
    pub oee_target: Option<f64>,
}

/// DTO for updating a work center. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateWorkCenter {
    pub name: Option<String>,
    pub code: Option<String>,
    pub tag: Option<String>,
    pub alternative_ids: Option<Vec<DbId>>,
    pub cost_per_hour: Option<f64>,
    pub capacity: Option<i32>,
    pub time_efficiency: Option<f64>,
    pub oee_target: Option<f64>,
    pub status: Option<String>,
}
