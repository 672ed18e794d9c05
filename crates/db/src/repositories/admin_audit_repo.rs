//! Repository for the append-only `admin_audit` table.

use classhopper_core::types::DbId;
use sqlx::PgPool;

use crate::models::admin_audit::{AdminAudit, CreateAdminAudit};

const COLUMNS: &str = "id, actor_uid, action, target, meta, created_at";

/// Default and maximum page sizes for [`AdminAuditRepo::list`].
const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 500;

pub struct AdminAuditRepo;

impl AdminAuditRepo {
    /// Append an audit entry.
    pub async fn append(pool: &PgPool, input: &CreateAdminAudit) -> Result<AdminAudit, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_audit (actor_uid, action, target, meta)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminAudit>(&query)
            .bind(input.actor_uid)
            .bind(&input.action)
            .bind(&input.target)
            .bind(&input.meta)
            .fetch_one(pool)
            .await
    }

    /// Append an audit entry, logging instead of propagating a failure.
    ///
    /// Used after the audited action has already committed.
    pub async fn append_logged(pool: &PgPool, input: &CreateAdminAudit) {
        if let Err(e) = Self::append(pool, input).await {
            tracing::error!(
                error = %e,
                actor_uid = input.actor_uid,
                action = %input.action,
                "Failed to write admin audit entry",
            );
        }
    }

    /// List audit entries newest first with limit/offset pagination.
    pub async fn list(
        pool: &PgPool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<AdminAudit>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = offset.unwrap_or(0).max(0);
        let query = format!(
            "SELECT {COLUMNS} FROM admin_audit ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, AdminAudit>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// All entries whose target names the given submission, oldest first.
    pub async fn list_for_submission(
        pool: &PgPool,
        submission_id: DbId,
    ) -> Result<Vec<AdminAudit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM admin_audit
             WHERE (target->>'submissionId')::BIGINT = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, AdminAudit>(&query)
            .bind(submission_id)
            .fetch_all(pool)
            .await
    }
}
