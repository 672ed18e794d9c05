//! Typed views over submission payloads.
//!
//! Payloads are stored verbatim as JSON. [`RegistrationForm::parse_submitted`]
//! is used at the public boundary (schema-checked), while
//! [`RegistrationForm::from_stored`] decodes an already-accepted payload at
//! ingestion time and tolerates an empty project list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::validation::{validate_payload, REGISTRATION_SCHEMA, TOPIC_SUGGESTION_SCHEMA};

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClanRole {
    Leader,
    Member,
}

impl ClanRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClanRole::Leader => "leader",
            ClanRole::Member => "member",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    Software,
    Robotics,
    Design,
    Ai,
    Mobile,
    Web,
    Other,
}

impl ProjectCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectCategory::Software => "software",
            ProjectCategory::Robotics => "robotics",
            ProjectCategory::Design => "design",
            ProjectCategory::Ai => "ai",
            ProjectCategory::Mobile => "mobile",
            ProjectCategory::Web => "web",
            ProjectCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Idea,
    Active,
    Completed,
    Paused,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Idea => "idea",
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Paused => "paused",
        }
    }
}

// ---------------------------------------------------------------------------
// Registration form
// ---------------------------------------------------------------------------

/// One project entry of a registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub project_name: String,
    pub project_summary: String,
    pub project_category: ProjectCategory,
    /// Kept in submission order; duplicates are preserved.
    pub project_tech_tags: Vec<String>,
    pub project_status: ProjectStatus,
}

/// A student registration as submitted through the public form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone: String,
    pub university: String,
    pub department: String,
    pub class_year: String,
    pub clan_name: String,
    pub clan_role: ClanRole,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(rename = "consentKVKK", default)]
    pub consent_kvkk: bool,
}

impl RegistrationForm {
    /// Validate a raw public payload and narrow it to a typed form.
    pub fn parse_submitted(payload: &Value) -> Result<Self, CoreError> {
        validate_payload(REGISTRATION_SCHEMA, payload)?;
        serde_json::from_value(payload.clone())
            .map_err(|e| CoreError::validation("payload", e.to_string()))
    }

    /// Decode a payload that was accepted earlier and is now being ingested.
    pub fn from_stored(payload: &Value) -> Result<Self, CoreError> {
        serde_json::from_value(payload.clone()).map_err(|e| {
            CoreError::InvalidState(format!("Stored payload is not a registration form: {e}"))
        })
    }
}

// ---------------------------------------------------------------------------
// Topic suggestion
// ---------------------------------------------------------------------------

/// A forum topic suggested by an anonymous visitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSuggestion {
    pub title: String,
    pub body: String,
    pub category_id: String,
    #[serde(default)]
    pub tag_ids: Vec<String>,
}

impl TopicSuggestion {
    /// Validate a raw public payload and narrow it to a typed suggestion.
    pub fn parse_submitted(payload: &Value) -> Result<Self, CoreError> {
        validate_payload(TOPIC_SUGGESTION_SCHEMA, payload)?;
        serde_json::from_value(payload.clone())
            .map_err(|e| CoreError::validation("payload", e.to_string()))
    }
}
