//! Department entity model and DTOs.

use gearguard_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A department row from the `departments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Department {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
}

/// DTO for creating a new department.
#[derive(Debug, Deserialize)]
pub struct CreateDepartment {
    pub name: String,
    pub description: Option<String>,
}
