//! Submission entity model and DTOs.

use classhopper_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `submissions` table.
///
/// `payload` is the validated document re-serialized from its typed form, so
/// fields outside the schema are dropped. The two hashes are salted HMACs,
/// never the raw address or user agent.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Submission {
    pub id: DbId,
    pub payload: serde_json::Value,
    pub ip_hash: String,
    pub user_agent_hash: String,
    pub submission_type: String,
    pub status: String,
    pub created_at: Timestamp,
    pub processed_at: Option<Timestamp>,
}

/// DTO for storing a new pending submission.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmission {
    pub payload: serde_json::Value,
    pub ip_hash: String,
    pub user_agent_hash: String,
    pub submission_type: String,
}

/// Acknowledgment returned to the public submitter.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub id: DbId,
    pub timestamp: Timestamp,
}

impl From<&Submission> for SubmissionReceipt {
    fn from(s: &Submission) -> Self {
        Self {
            id: s.id,
            timestamp: s.created_at,
        }
    }
}
