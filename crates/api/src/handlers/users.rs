//! Handlers for the `/admin/users` resource (user management).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gearguard_core::error::CoreError;
use gearguard_core::lifecycle::validate_unique_ids;
use gearguard_core::roles::{is_valid_role, ALL_ROLES, ROLE_EMPLOYEE};
use gearguard_core::types::DbId;
use serde::Deserialize;

use gearguard_db::models::user::{CreateUser, UpdateUser, UserResponse};
use gearguard_db::repositories::UserRepo;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Minimum password length enforced on user creation.
const MIN_PASSWORD_LENGTH: usize = 6;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Option<String>,
    pub department_id: Option<DbId>,
    pub team_ids: Option<Vec<DbId>>,
}

/// Request body for `PUT /admin/users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub department_id: Option<DbId>,
    pub is_active: Option<bool>,
    /// Present (even empty) replaces team memberships; omitted leaves them.
    pub team_ids: Option<Vec<DbId>>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/users
///
/// Create a new user. Validates the role and password, hashes the password,
/// and seeds team memberships when `team_ids` is given.
pub async fn create_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let role = input.role.unwrap_or_else(|| ROLE_EMPLOYEE.to_string());
    validate_role(&role)?;

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Username already exists".into(),
        )));
    }
    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already exists".into(),
        )));
    }

    let team_ids = input.team_ids.unwrap_or_default();
    validate_unique_ids("team_ids", &team_ids).map_err(AppError::Core)?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        username: input.username,
        email: input.email,
        password_hash: hashed,
        name: input.name,
        role,
        department_id: input.department_id,
    };

    let user = UserRepo::create(&state.pool, &create_dto, &team_ids).await?;

    tracing::info!(user_id = user.id, username = %user.username, "User created");

    Ok((
        StatusCode::CREATED,
        Json(UserResponse::from_user(&user, team_ids)),
    ))
}

/// GET /api/v1/admin/users
///
/// List all users with their team memberships.
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;

    // Pre-fetch all memberships to avoid N+1 queries.
    let memberships = UserRepo::memberships(&state.pool).await?;

    let responses: Vec<UserResponse> = users
        .iter()
        .map(|u| {
            let team_ids = memberships
                .iter()
                .filter(|(user_id, _)| *user_id == u.id)
                .map(|(_, team_id)| *team_id)
                .collect();
            UserResponse::from_user(u, team_ids)
        })
        .collect();

    Ok(Json(responses))
}

/// GET /api/v1/admin/users/{id}
///
/// Get a single user by ID.
pub async fn get_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    let team_ids = UserRepo::team_ids(&state.pool, id).await?;

    Ok(Json(UserResponse::from_user(&user, team_ids)))
}

/// PUT /api/v1/admin/users/{id}
///
/// Update a user's profile fields (not password). `team_ids` present
/// replaces the membership set wholesale; omitted leaves it untouched.
pub async fn update_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    if let Some(role) = &input.role {
        validate_role(role)?;
    }
    if let Some(team_ids) = &input.team_ids {
        validate_unique_ids("team_ids", team_ids).map_err(AppError::Core)?;
    }

    let update_dto = UpdateUser {
        username: input.username,
        email: input.email,
        name: input.name,
        role: input.role,
        department_id: input.department_id,
        is_active: input.is_active,
    };

    let user = UserRepo::update(&state.pool, id, &update_dto, input.team_ids.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    let team_ids = UserRepo::team_ids(&state.pool, id).await?;

    tracing::info!(user_id = id, "User updated");

    Ok(Json(UserResponse::from_user(&user, team_ids)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate that a role name is one of the known roles.
fn validate_role(role: &str) -> AppResult<()> {
    if !is_valid_role(role) {
        return Err(AppError::BadRequest(format!(
            "Invalid role '{}'. Must be one of: {}",
            role,
            ALL_ROLES.join(", ")
        )));
    }
    Ok(())
}
