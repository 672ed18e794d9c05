//! Admin audit constants and record builders.
//!
//! This module lives in `core` (zero internal deps) so the repository layer,
//! the API server and the admin tooling agree on action names and on the
//! shape of the `target` / `meta` documents.

use serde_json::{json, Value};

use crate::types::DbId;

/// Known action types for admin audit entries.
pub mod action_types {
    pub const APPROVE_SUBMISSION: &str = "approve_submission";
    pub const REJECT_SUBMISSION: &str = "reject_submission";
    pub const DELETE_SUBMISSION: &str = "delete_submission";
}

/// Build the `target` document for a submission-scoped action.
///
/// `submission_type` is recorded for approvals so the log shows which
/// ingestion path ran.
pub fn submission_target(submission_id: DbId, submission_type: Option<&str>) -> Value {
    match submission_type {
        Some(t) => json!({ "submissionId": submission_id, "type": t }),
        None => json!({ "submissionId": submission_id }),
    }
}

/// Build the `meta` document: wall-clock time of the decision in epoch millis.
pub fn decision_meta(now: chrono::DateTime<chrono::Utc>) -> Value {
    json!({ "timestamp": now.timestamp_millis() })
}
