//! Handlers for the `/teams` resource.
//!
//! Teams carry a member set supplied wholesale as `member_ids`: present
//! (even empty) replaces all join rows, omitted leaves them untouched.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use gearguard_core::error::CoreError;
use gearguard_core::lifecycle::validate_unique_ids;
use gearguard_core::types::DbId;
use serde::Deserialize;

use gearguard_db::models::team::{CreateTeam, TeamResponse, UpdateTeam};
use gearguard_db::repositories::TeamRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /teams`.
#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    #[serde(flatten)]
    pub team: CreateTeam,
    pub member_ids: Option<Vec<DbId>>,
}

/// Request body for `PATCH /teams/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateTeamRequest {
    #[serde(flatten)]
    pub team: UpdateTeam,
    pub member_ids: Option<Vec<DbId>>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/teams
///
/// List all teams with their member sets.
pub async fn list_teams(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let teams = TeamRepo::list(&state.pool).await?;

    // Pre-fetch all memberships to avoid N+1 queries.
    let memberships = TeamRepo::memberships(&state.pool).await?;

    let responses: Vec<TeamResponse> = teams
        .iter()
        .map(|t| {
            let member_ids = memberships
                .iter()
                .filter(|(team_id, _)| *team_id == t.id)
                .map(|(_, user_id)| *user_id)
                .collect();
            TeamResponse::from_team(t, member_ids)
        })
        .collect();

    Ok(Json(DataResponse { data: responses }))
}

/// GET /api/v1/teams/{id}
pub async fn get_team(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let team = TeamRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Team", id }))?;
    let member_ids = TeamRepo::member_ids(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: TeamResponse::from_team(&team, member_ids),
    }))
}

/// POST /api/v1/teams
pub async fn create_team(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTeamRequest>,
) -> AppResult<impl IntoResponse> {
    if input.team.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }

    let member_ids = input.member_ids.unwrap_or_default();
    validate_unique_ids("member_ids", &member_ids).map_err(AppError::Core)?;

    let team = TeamRepo::create(&state.pool, &input.team, &member_ids).await?;

    tracing::info!(team_id = team.id, user_id = auth.user_id, "Team created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: TeamResponse::from_team(&team, member_ids),
        }),
    ))
}

/// PATCH /api/v1/teams/{id}
///
/// Update a team. `member_ids: []` empties the member set; omitting
/// `member_ids` leaves the existing set untouched.
pub async fn update_team(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTeamRequest>,
) -> AppResult<impl IntoResponse> {
    if let Some(member_ids) = &input.member_ids {
        validate_unique_ids("member_ids", member_ids).map_err(AppError::Core)?;
    }

    let team = TeamRepo::update(&state.pool, id, &input.team, input.member_ids.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Team", id }))?;
    let member_ids = TeamRepo::member_ids(&state.pool, id).await?;

    tracing::info!(team_id = id, user_id = auth.user_id, "Team updated");

    Ok(Json(DataResponse {
        data: TeamResponse::from_team(&team, member_ids),
    }))
}
