//! Project entity model and DTOs.

use classhopper_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub summary: String,
    pub category: String,
    /// Stored in submission order, duplicates included.
    pub tech_tags: Vec<String>,
    pub status: String,
    pub owner_student_id: DbId,
    pub clan_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a project during ingestion.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub summary: String,
    pub category: String,
    pub tech_tags: Vec<String>,
    pub status: String,
    pub owner_student_id: DbId,
    pub clan_id: DbId,
}
