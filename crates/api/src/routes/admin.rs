//! Route definitions for the `/admin` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{records, submissions};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET    /submissions                 -> list_submissions
/// GET    /submissions/export          -> export_submissions
/// GET    /submissions/{id}            -> get_submission
/// DELETE /submissions/{id}            -> delete_submission
/// POST   /submissions/{id}/decision   -> decide_submission
/// GET    /clans                       -> list_clans
/// GET    /students                    -> list_students
/// GET    /projects                    -> list_projects
/// GET    /audit                       -> list_audit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submissions", get(submissions::list_submissions))
        .route("/submissions/export", get(submissions::export_submissions))
        .route(
            "/submissions/{id}",
            get(submissions::get_submission).delete(submissions::delete_submission),
        )
        .route(
            "/submissions/{id}/decision",
            post(submissions::decide_submission),
        )
        .route("/clans", get(records::list_clans))
        .route("/students", get(records::list_students))
        .route("/projects", get(records::list_projects))
        .route("/audit", get(records::list_audit))
}
