//! Handlers for moderating submissions under `/admin/submissions`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use classhopper_core::audit::{action_types, decision_meta, submission_target};
use classhopper_core::error::CoreError;
use classhopper_core::export::{export_filename, render_csv};
use classhopper_core::registration::RegistrationForm;
use classhopper_core::search::SubmissionFilter;
use classhopper_core::submission::{validate_status, Decision, SubmissionType, TYPE_FORM};
use classhopper_core::types::DbId;
use classhopper_db::ingestion;
use classhopper_db::models::admin_audit::{AdminAudit, CreateAdminAudit};
use classhopper_db::models::submission::Submission;
use classhopper_db::repositories::{AdminAuditRepo, SubmissionRepo};
use serde::{Deserialize, Serialize};

use super::json_body;
use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{Ack, DataResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for the submission list and CSV export.
#[derive(Debug, Default, Deserialize)]
pub struct SubmissionListQuery {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub submission_type: Option<String>,
    pub search: Option<String>,
    pub university: Option<String>,
    pub category: Option<String>,
}

impl SubmissionListQuery {
    fn content_filter(&self) -> SubmissionFilter {
        SubmissionFilter {
            search: self.search.clone(),
            university: self.university.clone(),
            category: self.category.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub action: Decision,
}

/// A submission together with its moderation history.
#[derive(Debug, Serialize)]
pub struct SubmissionDetail {
    #[serde(flatten)]
    pub submission: Submission,
    pub audit: Vec<AdminAudit>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load submissions newest first, applying the status/type filters in SQL
/// and the content filters over decoded registration forms.
///
/// When a content filter is set only registration forms can match.
async fn load_filtered(
    state: &AppState,
    query: &SubmissionListQuery,
    forced_type: Option<&str>,
) -> AppResult<Vec<(Submission, Option<RegistrationForm>)>> {
    let status = non_blank(&query.status);
    if let Some(status) = status {
        validate_status(status)?;
    }
    let submission_type = forced_type.or(non_blank(&query.submission_type));
    if let Some(t) = submission_type {
        SubmissionType::parse(t).ok_or_else(|| {
            CoreError::validation("type", format!("Unknown submission type '{t}'"))
        })?;
    }

    let rows = SubmissionRepo::list(&state.pool, status, submission_type).await?;
    let filter = query.content_filter();

    let decoded = rows.into_iter().map(|row| {
        let form = (row.submission_type == TYPE_FORM)
            .then(|| RegistrationForm::from_stored(&row.payload).ok())
            .flatten();
        (row, form)
    });

    if filter.is_empty() {
        return Ok(decoded.collect());
    }
    Ok(decoded
        .filter(|(_, form)| form.as_ref().is_some_and(|f| filter.matches(f)))
        .collect())
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/submissions
pub async fn list_submissions(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<SubmissionListQuery>,
) -> AppResult<Json<DataResponse<Vec<Submission>>>> {
    let rows = load_filtered(&state, &query, None).await?;
    Ok(Json(DataResponse {
        data: rows.into_iter().map(|(row, _)| row).collect(),
    }))
}

/// GET /api/v1/admin/submissions/export
///
/// CSV of the filtered registration forms, one row per project.
pub async fn export_submissions(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<SubmissionListQuery>,
) -> AppResult<impl IntoResponse> {
    let rows = load_filtered(&state, &query, Some(TYPE_FORM)).await?;
    let forms: Vec<_> = rows
        .iter()
        .filter_map(|(row, form)| form.as_ref().map(|f| (f, row.created_at)))
        .collect();

    let csv = render_csv(forms.iter().copied());
    tracing::info!(user_id = admin.user_id, submissions = forms.len(), "Submissions exported");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export_filename(Utc::now())),
            ),
        ],
        csv,
    ))
}

/// GET /api/v1/admin/submissions/{id}
pub async fn get_submission(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SubmissionDetail>>> {
    let submission = SubmissionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Submission",
            id,
        })?;
    let audit = AdminAuditRepo::list_for_submission(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: SubmissionDetail { submission, audit },
    }))
}

/// DELETE /api/v1/admin/submissions/{id}
///
/// Removes the stored submission only; records created by an earlier
/// approval are kept.
pub async fn delete_submission(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Ack>> {
    let deleted = SubmissionRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "Submission",
            id,
        }
        .into());
    }

    tracing::info!(submission_id = id, user_id = admin.user_id, "Submission deleted");
    AdminAuditRepo::append_logged(
        &state.pool,
        &CreateAdminAudit {
            actor_uid: admin.user_id,
            action: action_types::DELETE_SUBMISSION.to_string(),
            target: submission_target(id, None),
            meta: decision_meta(Utc::now()),
        },
    )
    .await;

    Ok(Json(Ack::message("Submission deleted")))
}

/// POST /api/v1/admin/submissions/{id}/decision
///
/// Body `{ "action": "approve" | "reject" }`.
pub async fn decide_submission(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Result<Json<DecisionRequest>, JsonRejection>,
) -> AppResult<Json<Ack>> {
    let request = json_body(body)?;

    ingestion::decide(&state.pool, id, request.action, admin.user_id).await?;

    let message = match request.action {
        Decision::Approve => "Submission approved and ingested",
        Decision::Reject => "Submission rejected",
    };
    Ok(Json(Ack::message(message)))
}
