//! Handlers for the `/logs` resource (read-only audit trail).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use gearguard_db::repositories::ActivityLogRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/logs
///
/// List all activity log entries, most recent first. The trail is
/// append-only; there are no write endpoints.
pub async fn list_logs(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let logs = ActivityLogRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: logs }))
}
