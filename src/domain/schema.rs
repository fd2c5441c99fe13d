use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use crate::domain::issue::{CandidateIssue, IssueType, Priority, ValidatedIssue};

pub const FIELD_ISSUE_TYPE: &str = "issue_type";
pub const FIELD_SUMMARY: &str = "summary";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_PRIORITY: &str = "priority";

const KNOWN_FIELDS: [&str; 4] = [
    FIELD_ISSUE_TYPE,
    FIELD_SUMMARY,
    FIELD_DESCRIPTION,
    FIELD_PRIORITY,
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("issue is not a JSON object")]
    NotAnObject,
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("field '{0}' must not be empty")]
    EmptyField(&'static str),
    #[error("field '{0}' must be a string")]
    WrongType(&'static str),
    #[error("'{value}' is not an allowed value for '{field}'")]
    InvalidValue { field: &'static str, value: String },
}

/// Normalises one model-produced issue and checks it against the ticket shape.
///
/// A missing or empty `issue_type` falls back to `Task` and a missing
/// `priority` to `Medium`. Anything else that does not fit is rejected.
pub fn validate_candidate(candidate: CandidateIssue) -> Result<ValidatedIssue, SchemaViolation> {
    let Value::Object(mut fields) = candidate.0 else {
        return Err(SchemaViolation::NotAnObject);
    };

    if let Some(unknown) = fields
        .keys()
        .find(|key| !KNOWN_FIELDS.contains(&key.as_str()))
    {
        return Err(SchemaViolation::UnknownField(unknown.clone()));
    }

    let issue_type = match fields.remove(FIELD_ISSUE_TYPE) {
        None | Some(Value::Null) => fallback_issue_type(),
        Some(Value::String(name)) if name.is_empty() => fallback_issue_type(),
        Some(Value::String(name)) => {
            IssueType::from_str(&name).ok_or(SchemaViolation::InvalidValue {
                field: FIELD_ISSUE_TYPE,
                value: name,
            })?
        }
        Some(other) => {
            return Err(SchemaViolation::InvalidValue {
                field: FIELD_ISSUE_TYPE,
                value: other.to_string(),
            });
        }
    };

    let summary = required_text(&mut fields, FIELD_SUMMARY)?;
    let description = required_text(&mut fields, FIELD_DESCRIPTION)?;

    let priority = match fields.remove(FIELD_PRIORITY) {
        None | Some(Value::Null) => Priority::default(),
        Some(Value::String(name)) => {
            Priority::from_str(&name).ok_or(SchemaViolation::InvalidValue {
                field: FIELD_PRIORITY,
                value: name,
            })?
        }
        Some(other) => {
            return Err(SchemaViolation::InvalidValue {
                field: FIELD_PRIORITY,
                value: other.to_string(),
            });
        }
    };

    Ok(ValidatedIssue {
        issue_type,
        summary,
        description,
        priority,
    })
}

fn fallback_issue_type() -> IssueType {
    warn!(
        "model output is missing '{FIELD_ISSUE_TYPE}', defaulting to '{}'",
        IssueType::FALLBACK
    );
    IssueType::FALLBACK
}

fn required_text(
    fields: &mut Map<String, Value>,
    field: &'static str,
) -> Result<String, SchemaViolation> {
    match fields.remove(field) {
        None | Some(Value::Null) => Err(SchemaViolation::MissingField(field)),
        Some(Value::String(text)) if text.trim().is_empty() => {
            Err(SchemaViolation::EmptyField(field))
        }
        Some(Value::String(text)) => Ok(text),
        Some(_) => Err(SchemaViolation::WrongType(field)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn validate(value: Value) -> Result<ValidatedIssue, SchemaViolation> {
        validate_candidate(CandidateIssue(value))
    }

    #[test]
    fn accepts_complete_issue() {
        let issue = validate(json!({
            "issue_type": "Story",
            "summary": "Add dark mode",
            "description": "As a user I want a dark theme.",
            "priority": "High",
        }))
        .unwrap();

        assert_eq!(issue.issue_type, IssueType::Story);
        assert_eq!(issue.summary, "Add dark mode");
        assert_eq!(issue.description, "As a user I want a dark theme.");
        assert_eq!(issue.priority, Priority::High);
    }

    #[test]
    fn defaults_missing_issue_type_to_task() {
        let issue = validate(json!({
            "summary": "Define tech stack",
            "description": "Pick the languages and frameworks.",
        }))
        .unwrap();
        assert_eq!(issue.issue_type, IssueType::Task);
    }

    #[test]
    fn defaults_empty_or_null_issue_type_to_task() {
        for issue_type in [json!(""), Value::Null] {
            let issue = validate(json!({
                "issue_type": issue_type,
                "summary": "Set up CI",
                "description": "Pipelines for every push.",
            }))
            .unwrap();
            assert_eq!(issue.issue_type, IssueType::Task);
        }
    }

    #[test]
    fn defaults_missing_priority_to_medium() {
        let issue = validate(json!({
            "issue_type": "Bug",
            "summary": "Fix login crash on Android",
            "description": "The app crashes after submitting credentials.",
        }))
        .unwrap();
        assert_eq!(issue.priority, Priority::Medium);
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = validate(json!({
            "issue_type": "Bug",
            "summary": "Crash",
            "description": "Crashes.",
            "assignee": "alice",
        }))
        .unwrap_err();
        assert_eq!(err, SchemaViolation::UnknownField("assignee".to_string()));
    }

    #[test]
    fn rejects_missing_summary_and_description() {
        let err = validate(json!({ "issue_type": "Task", "description": "Body" })).unwrap_err();
        assert_eq!(err, SchemaViolation::MissingField(FIELD_SUMMARY));

        let err = validate(json!({ "issue_type": "Task", "summary": "Title" })).unwrap_err();
        assert_eq!(err, SchemaViolation::MissingField(FIELD_DESCRIPTION));
    }

    #[test]
    fn rejects_blank_text_fields() {
        let err = validate(json!({
            "issue_type": "Task",
            "summary": "   ",
            "description": "Body",
        }))
        .unwrap_err();
        assert_eq!(err, SchemaViolation::EmptyField(FIELD_SUMMARY));
    }

    #[test]
    fn rejects_values_outside_enumerations() {
        let err = validate(json!({
            "issue_type": "Epic",
            "summary": "Title",
            "description": "Body",
        }))
        .unwrap_err();
        assert_eq!(
            err,
            SchemaViolation::InvalidValue {
                field: FIELD_ISSUE_TYPE,
                value: "Epic".to_string(),
            }
        );

        let err = validate(json!({
            "issue_type": "Task",
            "summary": "Title",
            "description": "Body",
            "priority": "Critical",
        }))
        .unwrap_err();
        assert_eq!(
            err,
            SchemaViolation::InvalidValue {
                field: FIELD_PRIORITY,
                value: "Critical".to_string(),
            }
        );
    }

    #[test]
    fn rejects_non_string_fields() {
        let err = validate(json!({
            "issue_type": "Task",
            "summary": 42,
            "description": "Body",
        }))
        .unwrap_err();
        assert_eq!(err, SchemaViolation::WrongType(FIELD_SUMMARY));
    }

    #[test]
    fn rejects_non_objects() {
        let err = validate(json!(["Bug", "Crash"])).unwrap_err();
        assert_eq!(err, SchemaViolation::NotAnObject);
    }
}
