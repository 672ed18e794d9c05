//! Handlers for anonymous submissions.
//!
//! Both endpoints run the same pipeline: quota check (in the
//! [`PublicClient`] extractor), schema validation, storage with salted
//! client digests, then a best-effort notice to the moderators.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use classhopper_core::hashing::salted_hash;
use classhopper_core::moderation::screen_registration;
use classhopper_core::registration::{RegistrationForm, TopicSuggestion};
use classhopper_core::submission::SubmissionType;
use classhopper_db::models::submission::{CreateSubmission, Submission, SubmissionReceipt};
use classhopper_db::repositories::SubmissionRepo;
use classhopper_events::notice::SubmissionNotice;
use serde::Serialize;

use super::json_body;
use crate::error::{AppError, AppResult};
use crate::middleware::rate_limit::PublicClient;
use crate::response::Ack;
use crate::state::AppState;

/// POST /api/v1/public/submissions
pub async fn submit_registration(
    State(state): State<AppState>,
    client: PublicClient,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<Json<Ack<SubmissionReceipt>>> {
    let payload = json_body(body)?;
    let form = RegistrationForm::parse_submitted(&payload)?;
    screen_registration(&form, &state.config.banned_words)?;

    let submission = store(&state, &client, SubmissionType::Form, &form).await?;
    tracing::info!(
        submission_id = submission.id,
        clan = %form.clan_name,
        projects = form.projects.len(),
        "Registration received",
    );

    notify(
        &state,
        SubmissionNotice::for_registration(submission.id, submission.created_at, &form),
    );

    Ok(Json(Ack::with_data(
        "Form submitted successfully",
        SubmissionReceipt::from(&submission),
    )))
}

/// POST /api/v1/public/topic-suggestions
pub async fn submit_topic_suggestion(
    State(state): State<AppState>,
    client: PublicClient,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<Json<Ack<SubmissionReceipt>>> {
    let payload = json_body(body)?;
    let topic = TopicSuggestion::parse_submitted(&payload)?;

    let submission = store(&state, &client, SubmissionType::TopicSuggestion, &topic).await?;
    tracing::info!(submission_id = submission.id, "Topic suggestion received");

    notify(
        &state,
        SubmissionNotice::for_topic(submission.id, submission.created_at, &topic),
    );

    Ok(Json(Ack::with_data(
        "Topic suggestion submitted successfully",
        SubmissionReceipt::from(&submission),
    )))
}

/// Persist the validated document with salted digests of the client identity.
///
/// The typed value is re-serialized so fields outside the schema are dropped.
async fn store<T: Serialize>(
    state: &AppState,
    client: &PublicClient,
    submission_type: SubmissionType,
    document: &T,
) -> AppResult<Submission> {
    let payload = serde_json::to_value(document)
        .map_err(|e| AppError::InternalError(format!("Failed to encode payload: {e}")))?;

    let salt = &state.config.hash_salt;
    let input = CreateSubmission {
        payload,
        ip_hash: salted_hash(salt, &client.address),
        user_agent_hash: salted_hash(salt, &client.user_agent),
        submission_type: submission_type.as_str().to_string(),
    };
    Ok(SubmissionRepo::create(&state.pool, &input).await?)
}

/// Send a notice in the background; failures are logged only.
fn notify(state: &AppState, notice: SubmissionNotice) {
    let Some(mailer) = state.mailer.clone() else {
        return;
    };
    tokio::spawn(async move {
        if let Err(e) = mailer.deliver(&notice).await {
            tracing::error!(
                error = %e,
                submission_id = notice.submission_id,
                "Failed to send submission notice",
            );
        }
    });
}
