//! Route definitions for the `/categories` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Routes mounted at `/categories`: list and create.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(categories::list_categories).post(categories::create_category),
    )
}
