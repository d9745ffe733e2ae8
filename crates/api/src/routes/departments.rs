//! Route definitions for the `/departments` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::departments;
use crate::state::AppState;

/// Routes mounted at `/departments`: list and create.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(departments::list_departments).post(departments::create_department),
    )
}
