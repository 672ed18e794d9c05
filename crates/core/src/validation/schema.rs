//! The payload schemas accepted by the public submission endpoints.
//!
//! These are the only definitions of the registration and topic-suggestion
//! constraints. Every entry point that accepts one of these payloads must go
//! through [`validate_payload`] with the matching schema.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::evaluator::evaluate_schema;
use super::rules::{FieldRule, RuleKind};
use crate::error::CoreError;

/// Turkish mobile numbers, with optional `+90` or `0` trunk prefix.
pub const PHONE_PATTERN: &str = r"^(\+90|0)?5[0-9]{9}$";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("valid regex"));

/// Compiled [`PHONE_PATTERN`].
pub fn phone_regex() -> &'static Regex {
    &PHONE_RE
}

pub const PROJECT_CATEGORIES: &[&str] = &[
    "software", "robotics", "design", "ai", "mobile", "web", "other",
];
pub const PROJECT_STATUSES: &[&str] = &["idea", "active", "completed", "paused"];
pub const CLAN_ROLES: &[&str] = &["leader", "member"];

/// Maximum number of projects in one registration.
pub const MAX_PROJECTS: usize = 5;
/// Maximum number of technology tags per project.
pub const MAX_TECH_TAGS: usize = 10;

/// Rules applied to each entry of `projects`.
pub const PROJECT_SCHEMA: &[FieldRule] = &[
    FieldRule::required("projectName", RuleKind::StringLength { min: 2, max: 200 }),
    FieldRule::required(
        "projectSummary",
        RuleKind::StringLength { min: 10, max: 1000 },
    ),
    FieldRule::required("projectCategory", RuleKind::OneOf(PROJECT_CATEGORIES)),
    FieldRule::required(
        "projectTechTags",
        RuleKind::ArrayLength {
            min: 1,
            max: MAX_TECH_TAGS,
        },
    ),
    FieldRule::required("projectTechTags", RuleKind::EachString { max: Some(50) }),
    FieldRule::required("projectStatus", RuleKind::OneOf(PROJECT_STATUSES)),
];

/// The student registration form.
pub const REGISTRATION_SCHEMA: &[FieldRule] = &[
    FieldRule::required("firstName", RuleKind::StringLength { min: 2, max: 50 }),
    FieldRule::required("lastName", RuleKind::StringLength { min: 2, max: 50 }),
    FieldRule::optional("email", RuleKind::Email),
    FieldRule::required("phone", RuleKind::Pattern(phone_regex)),
    // Single-letter campus and department codes are in use, hence `min: 1`.
    FieldRule::required("university", RuleKind::StringLength { min: 1, max: 100 }),
    FieldRule::required("department", RuleKind::StringLength { min: 1, max: 100 }),
    FieldRule::required("classYear", RuleKind::NonEmpty),
    FieldRule::required("clanName", RuleKind::StringLength { min: 2, max: 100 }),
    FieldRule::required("clanRole", RuleKind::OneOf(CLAN_ROLES)),
    FieldRule::required(
        "projects",
        RuleKind::ArrayLength {
            min: 1,
            max: MAX_PROJECTS,
        },
    ),
    FieldRule::required("projects", RuleKind::EachObject(PROJECT_SCHEMA)),
    FieldRule::required("consentKVKK", RuleKind::LiteralTrue),
];

/// Forum topic suggestions.
pub const TOPIC_SUGGESTION_SCHEMA: &[FieldRule] = &[
    FieldRule::required("title", RuleKind::StringLength { min: 5, max: 200 }),
    FieldRule::required("body", RuleKind::StringLength { min: 10, max: 2000 }),
    FieldRule::required("categoryId", RuleKind::NonEmpty),
    FieldRule::required("tagIds", RuleKind::ArrayLength { min: 0, max: 5 }),
    FieldRule::required("tagIds", RuleKind::EachString { max: None }),
];

/// Validate `payload` against `schema`, surfacing the first violation.
pub fn validate_payload(schema: &[FieldRule], payload: &Value) -> Result<(), CoreError> {
    let result = evaluate_schema(schema, payload);
    match result.first_error() {
        None => Ok(()),
        Some(v) => Err(CoreError::validation(v.field.clone(), v.message.clone())),
    }
}
