//! Activity log model and DTOs.
//!
//! The audit trail is append-only: rows are written but never mutated or
//! deleted, so there is no update DTO.

use gearguard_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Reference type value for equipment-scoped log entries.
pub const REF_EQUIPMENT: &str = "equipment";
/// Reference type value for request-scoped log entries.
pub const REF_REQUEST: &str = "request";

/// An activity log row from the `activity_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityLog {
    pub id: DbId,
    pub reference_type: String,
    pub reference_id: DbId,
    pub action: String,
    pub performed_by: DbId,
    pub timestamp: Timestamp,
}

/// DTO for appending a new activity log entry.
#[derive(Debug, Clone)]
pub struct CreateActivityLog {
    pub reference_type: &'static str,
    pub reference_id: DbId,
    pub action: String,
    pub performed_by: DbId,
}
