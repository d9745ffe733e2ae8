//! Route definitions for the `/logs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::activity_logs;
use crate::state::AppState;

/// Routes mounted at `/logs`: read-only listing.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(activity_logs::list_logs))
}
