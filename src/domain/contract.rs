use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::issue::{IssueType, Priority};
use crate::domain::schema::{FIELD_DESCRIPTION, FIELD_ISSUE_TYPE, FIELD_PRIORITY, FIELD_SUMMARY};

pub const CREATE_ISSUES_FUNCTION: &str = "create_jira_issues";
pub const ISSUES_KEY: &str = "issues";

/// A function the model can be asked to call, in the function-calling wire shape.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

/// The structured output every extraction request asks the model for.
pub fn create_issues_function() -> FunctionDefinition {
    let issue_types: Vec<&str> = IssueType::ALL.iter().map(IssueType::as_str).collect();
    let priorities: Vec<&str> = Priority::ALL.iter().map(Priority::as_str).collect();

    FunctionDefinition {
        name: CREATE_ISSUES_FUNCTION,
        description: "Create one or more Jira issues. Return a JSON object with a key 'issues' \
                      that is an array of objects. Each object must have the following fields: \
                      issue_type (one of 'Bug', 'Story', 'Task', or 'Spike'), summary, description, \
                      and an optional priority (default is 'Medium').",
        parameters: json!({
            "type": "object",
            "properties": {
                ISSUES_KEY: {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            FIELD_ISSUE_TYPE: {
                                "type": "string",
                                "enum": issue_types,
                                "description": "The type of issue to create"
                            },
                            FIELD_SUMMARY: {
                                "type": "string",
                                "description": "A brief summary of the issue"
                            },
                            FIELD_DESCRIPTION: {
                                "type": "string",
                                "description": "Detailed description of the issue"
                            },
                            FIELD_PRIORITY: {
                                "type": "string",
                                "enum": priorities,
                                "description": "Priority of the issue"
                            }
                        },
                        "required": [FIELD_ISSUE_TYPE, FIELD_SUMMARY, FIELD_DESCRIPTION]
                    }
                }
            },
            "required": [ISSUES_KEY]
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_issue_item_shape() {
        let function = create_issues_function();
        assert_eq!(function.name, "create_jira_issues");

        let params = &function.parameters;
        assert_eq!(params["required"], json!(["issues"]));

        let item = &params["properties"]["issues"]["items"];
        assert_eq!(
            item["required"],
            json!(["issue_type", "summary", "description"])
        );
        assert_eq!(
            item["properties"]["issue_type"]["enum"],
            json!(["Bug", "Story", "Task", "Spike"])
        );
        assert_eq!(
            item["properties"]["priority"]["enum"],
            json!(["High", "Medium", "Low"])
        );
    }

    #[test]
    fn serializes_in_function_calling_shape() {
        let json = serde_json::to_value(create_issues_function()).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 3);
        assert!(json.get("parameters").is_some());
        assert!(json.get("description").is_some());
    }
}
