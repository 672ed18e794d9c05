//! Submission type and lifecycle constants.
//!
//! A submission starts `pending` and is moved exactly once, to either
//! `ingested` (approved) or `rejected`. Both are terminal.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_INGESTED: &str = "ingested";
pub const STATUS_REJECTED: &str = "rejected";

pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_INGESTED, STATUS_REJECTED];

pub const TYPE_FORM: &str = "form";
pub const TYPE_TOPIC_SUGGESTION: &str = "topicSuggestion";

pub const VALID_TYPES: &[&str] = &[TYPE_FORM, TYPE_TOPIC_SUGGESTION];

/// Kind of payload carried by a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionType {
    #[serde(rename = "form")]
    Form,
    #[serde(rename = "topicSuggestion")]
    TopicSuggestion,
}

impl SubmissionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionType::Form => TYPE_FORM,
            SubmissionType::TopicSuggestion => TYPE_TOPIC_SUGGESTION,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            TYPE_FORM => Some(SubmissionType::Form),
            TYPE_TOPIC_SUGGESTION => Some(SubmissionType::TopicSuggestion),
            _ => None,
        }
    }
}

/// An admin moderation decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// Status a pending submission moves to under this decision.
    pub fn target_status(&self) -> &'static str {
        match self {
            Decision::Approve => STATUS_INGESTED,
            Decision::Reject => STATUS_REJECTED,
        }
    }
}

/// Validate that a status filter string is one of the accepted values.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::validation(
            "status",
            format!(
                "Invalid status '{status}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ),
        ))
    }
}

/// Ensure a submission can still be moderated.
///
/// Re-processing is refused rather than repeated: the clan counters touched
/// by ingestion are not safe to apply twice.
pub fn ensure_pending(submission_id: DbId, status: &str) -> Result<(), CoreError> {
    if status == STATUS_PENDING {
        Ok(())
    } else {
        Err(CoreError::InvalidState(format!(
            "Submission {submission_id} is already {status}"
        )))
    }
}
