//! Clan membership model and DTOs.

use classhopper_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClanMember {
    pub id: DbId,
    pub student_id: DbId,
    pub clan_id: DbId,
    /// `leader` or `member`.
    pub role: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateClanMember {
    pub student_id: DbId,
    pub clan_id: DbId,
    pub role: String,
}
