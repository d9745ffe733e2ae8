//! Handlers for worksheets (time entries) nested under `/requests/{id}`.
//!
//! Totals are recomputed from the full entry set on every read: per-entry
//! hours clamp negative intervals to zero, and the overtime flag compares
//! the total against the request's estimated duration.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use gearguard_core::error::CoreError;
use gearguard_core::types::DbId;
use gearguard_core::worksheet::{aggregate, WorksheetTotals};
use serde::Serialize;

use gearguard_db::models::worksheet::{CreateWorksheet, Worksheet};
use gearguard_db::repositories::{RequestRepo, WorksheetRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Worksheet list payload: the entries plus their aggregation.
#[derive(Debug, Serialize)]
pub struct WorksheetList {
    pub entries: Vec<Worksheet>,
    #[serde(flatten)]
    pub totals: WorksheetTotals,
}

/// GET /api/v1/requests/{id}/worksheets
///
/// List a request's worksheet entries with computed total hours and the
/// overtime flag.
pub async fn list_worksheets(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = RequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id: request_id,
        }))?;

    let entries = WorksheetRepo::list_for_request(&state.pool, request_id).await?;

    let intervals: Vec<_> = entries.iter().map(|w| (w.start_time, w.end_time)).collect();
    let totals = aggregate(&intervals, request.duration_hours);

    Ok(Json(DataResponse {
        data: WorksheetList { entries, totals },
    }))
}

/// POST /api/v1/requests/{id}/worksheets
///
/// Log a time entry against a request. The entry is attributed to the
/// authenticated user.
pub async fn create_worksheet(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
    Json(input): Json<CreateWorksheet>,
) -> AppResult<impl IntoResponse> {
    RequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id: request_id,
        }))?;

    let worksheet = WorksheetRepo::create(&state.pool, request_id, auth.user_id, &input).await?;

    tracing::info!(
        worksheet_id = worksheet.id,
        request_id,
        user_id = auth.user_id,
        "Worksheet logged",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: worksheet })))
}

/// DELETE /api/v1/worksheets/{id}
pub async fn delete_worksheet(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = WorksheetRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Worksheet",
            id,
        }));
    }

    tracing::info!(worksheet_id = id, user_id = auth.user_id, "Worksheet deleted");

    Ok(StatusCode::NO_CONTENT)
}
