//! Worksheet (time entry) model and DTOs.

use gearguard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A worksheet row from the `worksheets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Worksheet {
    pub id: DbId,
    pub request_id: DbId,
    pub user_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub description: Option<String>,
}

/// DTO for logging a new worksheet entry. `request_id` comes from the URL
/// and `user_id` from the authenticated user.
#[derive(Debug, Deserialize)]
pub struct CreateWorksheet {
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub description: Option<String>,
}
