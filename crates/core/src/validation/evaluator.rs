//! Rule evaluator — pure logic, no database access.

use serde_json::{Map, Value};
use validator::ValidateEmail;

use super::rules::{FieldRule, FieldViolation, Presence, RuleKind, ValidationResult};

/// Evaluate a schema against a JSON payload.
///
/// A payload that is not a JSON object fails with a single violation on the
/// pseudo-field `payload`.
pub fn evaluate_schema(schema: &[FieldRule], payload: &Value) -> ValidationResult {
    let mut errors = Vec::new();
    match payload.as_object() {
        Some(data) => evaluate_object(schema, data, "", &mut errors),
        None => errors.push(FieldViolation {
            field: "payload".to_string(),
            rule_type: "type_check".to_string(),
            message: "payload must be a JSON object".to_string(),
        }),
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

fn evaluate_object(
    schema: &[FieldRule],
    data: &Map<String, Value>,
    prefix: &str,
    errors: &mut Vec<FieldViolation>,
) {
    let mut failed_fields: Vec<&str> = Vec::new();

    for rule in schema {
        if failed_fields.contains(&rule.field) {
            continue;
        }
        let path = format!("{prefix}{}", rule.field);
        let before = errors.len();
        evaluate_single_rule(rule, data.get(rule.field), &path, errors);
        if errors.len() > before {
            failed_fields.push(rule.field);
        }
    }
}

fn evaluate_single_rule(
    rule: &FieldRule,
    value: Option<&Value>,
    path: &str,
    errors: &mut Vec<FieldViolation>,
) {
    let value = match value {
        None | Some(Value::Null) => {
            if rule.presence == Presence::Required {
                errors.push(violation(path, "required", format!("{path} is required")));
            }
            return;
        }
        Some(v) => v,
    };

    match rule.kind {
        RuleKind::StringLength { min, max } => {
            if let Some(s) = expect_string(path, value, errors) {
                let len = s.chars().count();
                if len < min || len > max {
                    errors.push(violation(
                        path,
                        rule.kind.name(),
                        format!("{path} must be between {min} and {max} characters"),
                    ));
                }
            }
        }
        RuleKind::NonEmpty => {
            if let Some(s) = expect_string(path, value, errors) {
                if s.is_empty() {
                    errors.push(violation(
                        path,
                        rule.kind.name(),
                        format!("{path} must not be empty"),
                    ));
                }
            }
        }
        RuleKind::Pattern(regex) => {
            if let Some(s) = expect_string(path, value, errors) {
                if !regex().is_match(s) {
                    errors.push(violation(
                        path,
                        rule.kind.name(),
                        format!("{path} has an invalid format"),
                    ));
                }
            }
        }
        RuleKind::OneOf(allowed) => {
            if let Some(s) = expect_string(path, value, errors) {
                if !allowed.contains(&s) {
                    errors.push(violation(
                        path,
                        rule.kind.name(),
                        format!("{path} must be one of: {}", allowed.join(", ")),
                    ));
                }
            }
        }
        RuleKind::Email => {
            if let Some(s) = expect_string(path, value, errors) {
                if !s.validate_email() {
                    errors.push(violation(
                        path,
                        rule.kind.name(),
                        format!("{path} must be a valid email address"),
                    ));
                }
            }
        }
        RuleKind::LiteralTrue => {
            if value != &Value::Bool(true) {
                errors.push(violation(
                    path,
                    rule.kind.name(),
                    format!("{path} must be accepted"),
                ));
            }
        }
        RuleKind::ArrayLength { min, max } => {
            if let Some(items) = expect_array(path, value, errors) {
                if items.len() < min || items.len() > max {
                    errors.push(violation(
                        path,
                        rule.kind.name(),
                        format!("{path} must contain between {min} and {max} entries"),
                    ));
                }
            }
        }
        RuleKind::EachString { max } => {
            if let Some(items) = expect_array(path, value, errors) {
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{path}[{i}]");
                    match (item.as_str(), max) {
                        (None, _) => {
                            errors.push(type_violation(&item_path, "a string"));
                            return;
                        }
                        (Some(s), Some(max)) if s.chars().count() > max => {
                            errors.push(violation(
                                &item_path,
                                rule.kind.name(),
                                format!("{item_path} must be at most {max} characters"),
                            ));
                            return;
                        }
                        _ => {}
                    }
                }
            }
        }
        RuleKind::EachObject(nested) => {
            if let Some(items) = expect_array(path, value, errors) {
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{path}[{i}]");
                    match item.as_object() {
                        Some(obj) => {
                            evaluate_object(nested, obj, &format!("{item_path}."), errors)
                        }
                        None => errors.push(type_violation(&item_path, "an object")),
                    }
                }
            }
        }
    }
}

fn expect_string<'v>(
    path: &str,
    value: &'v Value,
    errors: &mut Vec<FieldViolation>,
) -> Option<&'v str> {
    let s = value.as_str();
    if s.is_none() {
        errors.push(type_violation(path, "a string"));
    }
    s
}

fn expect_array<'v>(
    path: &str,
    value: &'v Value,
    errors: &mut Vec<FieldViolation>,
) -> Option<&'v Vec<Value>> {
    let arr = value.as_array();
    if arr.is_none() {
        errors.push(type_violation(path, "an array"));
    }
    arr
}

fn type_violation(path: &str, expected: &str) -> FieldViolation {
    violation(path, "type_check", format!("{path} must be {expected}"))
}

fn violation(path: &str, rule_type: &str, message: String) -> FieldViolation {
    FieldViolation {
        field: path.to_string(),
        rule_type: rule_type.to_string(),
        message,
    }
}
