//! Validation rule and result types.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Whether a field may be absent from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    /// Absent or `null` skips every check for the field.
    Optional,
}

/// A single check applied to one field value.
#[derive(Debug, Clone, Copy)]
pub enum RuleKind {
    /// String length in characters, inclusive bounds.
    StringLength { min: usize, max: usize },
    /// String must contain at least one character.
    NonEmpty,
    /// String must match the compiled expression returned by the accessor.
    Pattern(fn() -> &'static Regex),
    /// String must be one of the listed values.
    OneOf(&'static [&'static str]),
    /// String must be a syntactically valid email address.
    Email,
    /// Value must be the boolean `true`.
    LiteralTrue,
    /// Array length, inclusive bounds.
    ArrayLength { min: usize, max: usize },
    /// Every array element must be a string, no longer than `max` characters
    /// when a bound is given.
    EachString { max: Option<usize> },
    /// Every array element must be an object satisfying the nested schema.
    EachObject(&'static [FieldRule]),
}

impl RuleKind {
    /// Stable identifier reported in [`FieldViolation::rule_type`].
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::StringLength { .. } => "string_length",
            RuleKind::NonEmpty => "non_empty",
            RuleKind::Pattern(_) => "regex_pattern",
            RuleKind::OneOf(_) => "enum_values",
            RuleKind::Email => "email",
            RuleKind::LiteralTrue => "literal_true",
            RuleKind::ArrayLength { .. } => "array_length",
            RuleKind::EachString { .. } => "each_string",
            RuleKind::EachObject(_) => "each_object",
        }
    }
}

/// A field-level rule in a declarative schema.
///
/// Rules for the same field are evaluated in declaration order; the first
/// failing rule for a field suppresses the remaining rules for that field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub presence: Presence,
    pub kind: RuleKind,
}

impl FieldRule {
    pub const fn required(field: &'static str, kind: RuleKind) -> Self {
        Self {
            field,
            presence: Presence::Required,
            kind,
        }
    }

    pub const fn optional(field: &'static str, kind: RuleKind) -> Self {
        Self {
            field,
            presence: Presence::Optional,
            kind,
        }
    }
}

/// Aggregated result of evaluating a schema against one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldViolation>,
}

impl ValidationResult {
    /// The violation to surface to a caller: the first one in schema order.
    pub fn first_error(&self) -> Option<&FieldViolation> {
        self.errors.first()
    }
}

/// A single field-level rule violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Dotted path of the field, e.g. `projects[1].projectName`.
    pub field: String,
    pub rule_type: String,
    pub message: String,
}
