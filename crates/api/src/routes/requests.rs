//! Route definitions for the `/requests` resource and nested worksheets.

use axum::routing::get;
use axum::Router;

use crate::handlers::{requests, worksheets};
use crate::state::AppState;

/// Routes mounted at `/requests`.
///
/// ```text
/// GET  /                   -> list_requests
/// POST /                   -> create_request
/// GET  /{id}               -> get_request
/// PUT  /{id}               -> update_request
/// GET  /{id}/worksheets    -> list_worksheets
/// POST /{id}/worksheets    -> create_worksheet
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(requests::list_requests).post(requests::create_request),
        )
        .route(
            "/{id}",
            get(requests::get_request).put(requests::update_request),
        )
        .route(
            "/{id}/worksheets",
            get(worksheets::list_worksheets).post(worksheets::create_worksheet),
        )
}

/// Routes mounted at `/worksheets` (delete by worksheet id).
pub fn worksheets_router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        axum::routing::delete(worksheets::delete_worksheet),
    )
}
