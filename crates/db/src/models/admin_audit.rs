//! Admin audit entry model and DTOs.
//!
//! Entries are append-only: there is no `updated_at` and no update/delete
//! operation in the repository.

use classhopper_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminAudit {
    pub id: DbId,
    /// Id of the admin user who performed the action.
    pub actor_uid: DbId,
    pub action: String,
    pub target: serde_json::Value,
    pub meta: serde_json::Value,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAdminAudit {
    pub actor_uid: DbId,
    pub action: String,
    pub target: serde_json::Value,
    pub meta: serde_json::Value,
}
