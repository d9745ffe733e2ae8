//! Handlers for the `/dashboard` summary endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use gearguard_db::repositories::dashboard_repo::CountByValue;
use gearguard_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Aggregated counts backing the dashboard widgets.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub requests_by_status: Vec<CountByValue>,
    pub equipment_by_status: Vec<CountByValue>,
    pub open_requests_by_priority: Vec<CountByValue>,
}

/// GET /api/v1/dashboard/summary
pub async fn summary(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let requests_by_status = DashboardRepo::requests_by_status(&state.pool).await?;
    let equipment_by_status = DashboardRepo::equipment_by_status(&state.pool).await?;
    let open_requests_by_priority = DashboardRepo::open_requests_by_priority(&state.pool).await?;

    Ok(Json(DataResponse {
        data: DashboardSummary {
            requests_by_status,
            equipment_by_status,
            open_requests_by_priority,
        },
    }))
}
