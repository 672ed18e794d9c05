//! Clan entity model.

use classhopper_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `clans` table. `name` is unique and case-sensitive.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Clan {
    pub id: DbId,
    pub name: String,
    pub member_count: i32,
    pub project_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
