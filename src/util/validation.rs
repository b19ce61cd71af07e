use sea_orm::ActiveEnum;
use serde_json::Value;
use crate::entity::bug::{Severity, Status};
use crate::model::bug::BugRequest;

pub const TITLE_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Runs every rule against the candidate and collects all messages in rule
/// order. No rule short-circuits another.
pub fn validate_bug(candidate: &BugRequest) -> ValidationResult {
    let mut errors = Vec::new();

    let title = text(&candidate.title);
    if is_blank(title) {
        errors.push("Title is required".to_string());
    }
    if title.is_some_and(|t| t.chars().count() > TITLE_MAX_LEN) {
        errors.push("Title cannot exceed 100 characters".to_string());
    }

    let description = text(&candidate.description);
    if is_blank(description) {
        errors.push("Description is required".to_string());
    }
    if description.is_some_and(|d| d.chars().count() > DESCRIPTION_MAX_LEN) {
        errors.push("Description cannot exceed 500 characters".to_string());
    }

    if is_blank(text(&candidate.reporter)) {
        errors.push("Reporter name is required".to_string());
    }

    if !is_member::<Severity>(&candidate.severity) {
        errors.push("Invalid severity level".to_string());
    }

    if !is_member::<Status>(&candidate.status) {
        errors.push("Invalid status".to_string());
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

fn text(value: &Option<Value>) -> Option<&str> {
    value.as_ref().and_then(Value::as_str)
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Absent, `null` and `""` are accepted; anything else must be one of the
/// enum's string values.
fn is_member<E>(value: &Option<Value>) -> bool
where
    E: ActiveEnum<Value = String>,
{
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) if s.is_empty() => true,
        Some(Value::String(s)) => E::try_from_value(s).is_ok(),
        Some(_) => false,
    }
}
