//! Handlers for the `/departments` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use gearguard_db::models::department::CreateDepartment;
use gearguard_db::repositories::DepartmentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/departments
pub async fn list_departments(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let departments = DepartmentRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: departments }))
}

/// POST /api/v1/departments
pub async fn create_department(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateDepartment>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }

    let department = DepartmentRepo::create(&state.pool, &input).await?;

    tracing::info!(department_id = department.id, user_id = auth.user_id, "Department created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: department })))
}
