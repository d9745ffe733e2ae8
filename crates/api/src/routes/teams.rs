//! Route definitions for the `/teams` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::teams;
use crate::state::AppState;

/// Routes mounted at `/teams`.
///
/// ```text
/// GET   /      -> list_teams
/// POST  /      -> create_team
/// GET   /{id}  -> get_team
/// PATCH /{id}  -> update_team
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(teams::list_teams).post(teams::create_team))
        .route("/{id}", get(teams::get_team).patch(teams::update_team))
}
