//! Student entity model and DTOs.

use classhopper_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `students` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    /// Always in `+90…` form.
    pub phone: String,
    pub university: String,
    pub department: String,
    pub class_year: String,
    pub display_handle: String,
    pub consent_kvkk: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a student during ingestion.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub university: String,
    pub department: String,
    pub class_year: String,
    pub display_handle: String,
    pub consent_kvkk: bool,
}
