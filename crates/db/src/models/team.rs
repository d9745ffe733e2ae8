//! Maintenance team entity model and DTOs.

use gearguard_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A team row from the `teams` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Team {
    pub id: DbId,
    pub name: String,
    pub specialization: Option<String>,
    pub description: Option<String>,
}

/// Team plus its member set, stitched from `team_members`.
///
/// `member_ids` carries no ordering guarantee; callers must treat it as a set.
#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub id: DbId,
    pub name: String,
    pub specialization: Option<String>,
    pub description: Option<String>,
    pub member_ids: Vec<DbId>,
}

impl TeamResponse {
    pub fn from_team(team: &Team, member_ids: Vec<DbId>) -> Self {
        Self {
            id: team.id,
            name: team.name.clone(),
            specialization: team.specialization.clone(),
            description: team.description.clone(),
            member_ids,
        }
    }
}

/// DTO for creating a new team.
#[derive(Debug, Deserialize)]
pub struct CreateTeam {
    pub name: String,
    pub specialization: Option<String>,
    pub description: Option<String>,
}

/// DTO for updating an existing team. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateTeam {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub description: Option<String>,
}
