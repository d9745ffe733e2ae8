pub mod admin;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod departments;
pub mod equipment;
pub mod health;
pub mod logs;
pub mod requests;
pub mod teams;
pub mod work_centers;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                      register (public)
/// /auth/login                         login (public)
/// /auth/refresh                       refresh (public)
/// /auth/logout                        logout (requires auth)
/// /auth/me                            current user
/// /auth/change-password               change password
/// /auth/forgot-password               start reset flow (public)
/// /auth/reset-password                consume reset token (public)
///
/// /admin/users                        list, create (admin only)
/// /admin/users/{id}                   get, update
///
/// /departments                        list, create
/// /categories                         list, create
///
/// /teams                              list, create
/// /teams/{id}                         get, update (member_ids replacement)
///
/// /equipment                          list, create
/// /equipment/{id}                     get, update (scrap derivation)
///
/// /requests                           list, create (lifecycle defaults)
/// /requests/{id}                      get, update (auto-transition, cascade)
/// /requests/{id}/worksheets           list (with totals), create
/// /worksheets/{id}                    delete
///
/// /work-centers                       list, create
/// /work-centers/{id}                  get, update
///
/// /logs                               list (append-only audit trail)
///
/// /dashboard/summary                  aggregated counts
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication and the password-reset flow.
        .nest("/auth", auth::router())
        // Admin user management.
        .nest("/admin", admin::router())
        // Master data.
        .nest("/departments", departments::router())
        .nest("/categories", categories::router())
        // Teams and their member sets.
        .nest("/teams", teams::router())
        // Equipment assets.
        .nest("/equipment", equipment::router())
        // Maintenance requests (also nests worksheets).
        .nest("/requests", requests::router())
        // Worksheet deletion by id.
        .nest("/worksheets", requests::worksheets_router())
        // Work centers.
        .nest("/work-centers", work_centers::router())
        // Activity log trail.
        .nest("/logs", logs::router())
        // Dashboard widgets.
        .nest("/dashboard", dashboard::router())
}
