pub mod admin;
pub mod auth;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /public/submissions                     registration form (rate limited)
/// /public/topic-suggestions               topic suggestion (rate limited)
///
/// /auth/login                             moderator login (public)
///
/// /admin/submissions                      list, filtered (admin only)
/// /admin/submissions/export               CSV export of the filtered list
/// /admin/submissions/{id}                 get, delete
/// /admin/submissions/{id}/decision        approve or reject (POST)
/// /admin/clans                            clan listing
/// /admin/students                         student listing
/// /admin/projects                         project listing
/// /admin/audit                            moderation log, newest first
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/public", public::router())
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
}
