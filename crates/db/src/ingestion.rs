//! Moderation workflow: turning a pending submission into normalized records.
//!
//! Approval and rejection each run in a single transaction. The submission
//! row is locked first and its status transition is conditional on
//! `pending`, so a decision can only ever be applied once. The audit entry
//! is written after commit and never fails the decision.

use chrono::Utc;
use classhopper_core::audit::{action_types, decision_meta, submission_target};
use classhopper_core::error::CoreError;
use classhopper_core::ingestion::{generate_display_handle, normalize_phone};
use classhopper_core::registration::RegistrationForm;
use classhopper_core::submission::{ensure_pending, Decision, SubmissionType};
use classhopper_core::types::DbId;
use serde::Serialize;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::admin_audit::CreateAdminAudit;
use crate::models::clan_member::CreateClanMember;
use crate::models::project::CreateProject;
use crate::models::student::CreateStudent;
use crate::models::submission::Submission;
use crate::repositories::{
    AdminAuditRepo, ClanMemberRepo, ClanRepo, ProjectRepo, StudentRepo, SubmissionRepo,
};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Records created while ingesting one registration form.
#[derive(Debug, Clone, Serialize)]
pub struct IngestedRecords {
    pub student_id: DbId,
    pub clan_id: DbId,
    pub clan_member_id: DbId,
    pub project_ids: Vec<DbId>,
}

/// Result of a moderation decision.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionOutcome {
    /// The submission after its status transition.
    pub submission: Submission,
    /// Present only for approved registration forms.
    pub records: Option<IngestedRecords>,
}

/// Approve a pending submission on behalf of `actor_uid`.
pub async fn approve_submission(
    pool: &PgPool,
    submission_id: DbId,
    actor_uid: DbId,
) -> Result<DecisionOutcome, IngestError> {
    decide(pool, submission_id, Decision::Approve, actor_uid).await
}

/// Reject a pending submission on behalf of `actor_uid`. Creates no records.
pub async fn reject_submission(
    pool: &PgPool,
    submission_id: DbId,
    actor_uid: DbId,
) -> Result<DecisionOutcome, IngestError> {
    decide(pool, submission_id, Decision::Reject, actor_uid).await
}

/// Apply `decision` to a pending submission.
///
/// Fails with `NotFound` for an unknown id and `InvalidState` when the
/// submission was already decided; in both cases nothing is written.
pub async fn decide(
    pool: &PgPool,
    submission_id: DbId,
    decision: Decision,
    actor_uid: DbId,
) -> Result<DecisionOutcome, IngestError> {
    let mut tx = pool.begin().await?;

    let submission = SubmissionRepo::lock_in_tx(&mut tx, submission_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Submission",
            id: submission_id,
        })?;
    ensure_pending(submission.id, &submission.status)?;

    let submission_type = SubmissionType::parse(&submission.submission_type).ok_or_else(|| {
        CoreError::InvalidState(format!(
            "Submission {submission_id} has unknown type '{}'",
            submission.submission_type
        ))
    })?;

    let records = match (decision, submission_type) {
        (Decision::Approve, SubmissionType::Form) => {
            let form = RegistrationForm::from_stored(&submission.payload)?;
            Some(ingest_form(&mut tx, &form).await?)
        }
        _ => None,
    };

    let updated =
        SubmissionRepo::set_status_in_tx(&mut tx, submission_id, decision.target_status())
            .await?
            .ok_or_else(|| {
                CoreError::InvalidState(format!("Submission {submission_id} is no longer pending"))
            })?;

    tx.commit().await?;

    tracing::info!(
        submission_id,
        actor_uid,
        status = %updated.status,
        submission_type = submission_type.as_str(),
        "Submission decided",
    );

    let (action, audit_type) = match decision {
        Decision::Approve => (action_types::APPROVE_SUBMISSION, Some(submission_type.as_str())),
        Decision::Reject => (action_types::REJECT_SUBMISSION, None),
    };
    AdminAuditRepo::append_logged(
        pool,
        &CreateAdminAudit {
            actor_uid,
            action: action.to_string(),
            target: submission_target(submission_id, audit_type),
            meta: decision_meta(Utc::now()),
        },
    )
    .await;

    Ok(DecisionOutcome {
        submission: updated,
        records,
    })
}

/// Create the student, clan membership and projects for one form.
async fn ingest_form(
    tx: &mut Transaction<'_, Postgres>,
    form: &RegistrationForm,
) -> Result<IngestedRecords, sqlx::Error> {
    let student = StudentRepo::create_in_tx(
        tx,
        &CreateStudent {
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            email: form.email.clone(),
            phone: normalize_phone(&form.phone),
            university: form.university.clone(),
            department: form.department.clone(),
            class_year: form.class_year.clone(),
            display_handle: generate_display_handle(&form.first_name, &form.last_name),
            consent_kvkk: form.consent_kvkk,
        },
    )
    .await?;

    let clan = ClanRepo::upsert_member_in_tx(tx, &form.clan_name).await?;

    let member = ClanMemberRepo::create_in_tx(
        tx,
        &CreateClanMember {
            student_id: student.id,
            clan_id: clan.id,
            role: form.clan_role.as_str().to_string(),
        },
    )
    .await?;

    let mut project_ids = Vec::with_capacity(form.projects.len());
    for entry in &form.projects {
        let project = ProjectRepo::create_in_tx(
            tx,
            &CreateProject {
                name: entry.project_name.clone(),
                summary: entry.project_summary.clone(),
                category: entry.project_category.as_str().to_string(),
                tech_tags: entry.project_tech_tags.clone(),
                status: entry.project_status.as_str().to_string(),
                owner_student_id: student.id,
                clan_id: clan.id,
            },
        )
        .await?;
        project_ids.push(project.id);
    }

    if !project_ids.is_empty() {
        ClanRepo::add_projects_in_tx(tx, clan.id, project_ids.len() as i32).await?;
    }

    tracing::debug!(
        student_id = student.id,
        clan_id = clan.id,
        projects = project_ids.len(),
        "Registration ingested",
    );

    Ok(IngestedRecords {
        student_id: student.id,
        clan_id: clan.id,
        clan_member_id: member.id,
        project_ids,
    })
}
