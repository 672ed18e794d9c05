//! Repository for the `submissions` table.

use classhopper_core::submission::STATUS_PENDING;
use classhopper_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::submission::{CreateSubmission, Submission};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, payload, ip_hash, user_agent_hash, submission_type, status, \
                        created_at, processed_at";

/// Provides storage operations for public submissions.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Insert a new submission in `pending` status, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSubmission) -> Result<Submission, sqlx::Error> {
        let query = format!(
            "INSERT INTO submissions (payload, ip_hash, user_agent_hash, submission_type)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(&input.payload)
            .bind(&input.ip_hash)
            .bind(&input.user_agent_hash)
            .bind(&input.submission_type)
            .fetch_one(pool)
            .await
    }

    /// Find a submission by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM submissions WHERE id = $1");
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List submissions newest first, optionally narrowed by status and type.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        submission_type: Option<&str>,
    ) -> Result<Vec<Submission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM submissions
             WHERE ($1::TEXT IS NULL OR status = $1)
               AND ($2::TEXT IS NULL OR submission_type = $2)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(status)
            .bind(submission_type)
            .fetch_all(pool)
            .await
    }

    /// Delete a submission. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM submissions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Load a submission and hold a row lock until the transaction ends.
    pub async fn lock_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM submissions WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Move a `pending` submission to `status` and stamp `processed_at`.
    ///
    /// Returns `None` when the row no longer exists or is not pending.
    pub async fn set_status_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        status: &str,
    ) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!(
            "UPDATE submissions SET status = $2, processed_at = NOW()
             WHERE id = $1 AND status = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .bind(status)
            .bind(STATUS_PENDING)
            .fetch_optional(&mut **tx)
            .await
    }
}
