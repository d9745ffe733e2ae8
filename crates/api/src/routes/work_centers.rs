//! Route definitions for the `/work-centers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::work_centers;
use crate::state::AppState;

/// Routes mounted at `/work-centers`.
///
/// ```text
/// GET  /      -> list_work_centers
/// POST /      -> create_work_center
/// GET  /{id}  -> get_work_center
/// PUT  /{id}  -> update_work_center
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(work_centers::list_work_centers).post(work_centers::create_work_center),
        )
        .route(
            "/{id}",
            get(work_centers::get_work_center).put(work_centers::update_work_center),
        )
}
