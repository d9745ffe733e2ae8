//! Handlers for the `/work-centers` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use gearguard_core::error::CoreError;
use gearguard_core::status::EquipmentStatus;
use gearguard_core::types::DbId;

use gearguard_db::models::work_center::{CreateWorkCenter, UpdateWorkCenter};
use gearguard_db::repositories::WorkCenterRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/work-centers
pub async fn list_work_centers(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let work_centers = WorkCenterRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: work_centers }))
}

/// GET /api/v1/work-centers/{id}
pub async fn get_work_center(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let work_center = WorkCenterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WorkCenter",
            id,
        }))?;

    Ok(Json(DataResponse { data: work_center }))
}

/// POST /api/v1/work-centers
///
/// Create a work center. A duplicate code is rejected with a field-naming
/// conflict before any row is inserted.
pub async fn create_work_center(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateWorkCenter>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    if input.code.trim().is_empty() {
        return Err(AppError::BadRequest("code must not be empty".into()));
    }

    if WorkCenterRepo::find_by_code(&state.pool, &input.code)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Code already exists".into(),
        )));
    }

    let work_center = WorkCenterRepo::create(&state.pool, &input).await?;

    tracing::info!(
        work_center_id = work_center.id,
        user_id = auth.user_id,
        "Work center created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: work_center })))
}

/// PUT /api/v1/work-centers/{id}
pub async fn update_work_center(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWorkCenter>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = &input.status {
        EquipmentStatus::parse(status).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Invalid status '{status}'. Must be one of: active, scrapped"
            ))
        })?;
    }

    let work_center = WorkCenterRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WorkCenter",
            id,
        }))?;

    tracing::info!(work_center_id = id, user_id = auth.user_id, "Work center updated");

    Ok(Json(DataResponse { data: work_center }))
}
