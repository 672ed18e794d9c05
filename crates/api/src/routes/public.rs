//! Route definitions for the anonymous `/public` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Routes mounted at `/public`. Both are subject to the per-address quota.
///
/// ```text
/// POST /submissions        -> submit_registration
/// POST /topic-suggestions  -> submit_topic_suggestion
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submissions", post(public::submit_registration))
        .route("/topic-suggestions", post(public::submit_topic_suggestion))
}
