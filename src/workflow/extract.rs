use serde_json::Value;
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::domain::contract::{CREATE_ISSUES_FUNCTION, ISSUES_KEY, create_issues_function};
use crate::domain::issue::{CandidateIssue, ValidatedIssue};
use crate::domain::schema::validate_candidate;
use crate::error::{AppResult, ExtractionFailure};
use crate::services::FunctionCallRequest;

/// Asks the language model for the issues described in `raw_text`.
///
/// The context document is re-read on every call. A single invalid issue
/// fails the whole batch; issues are returned in the order the model listed
/// them.
pub async fn extract_issues(ctx: &AppContext, raw_text: &str) -> AppResult<Vec<ValidatedIssue>> {
    let guidance = ctx.context_source.load().await?;
    let request = FunctionCallRequest {
        system_prompt: system_prompt(&guidance),
        user_prompt: user_prompt(raw_text),
        function: create_issues_function(),
    };

    let call = match ctx.language_model.call_function(&request).await? {
        Some(call) if call.name == CREATE_ISSUES_FUNCTION => call,
        Some(call) => {
            warn!(function = %call.name, "language model called an unexpected function");
            return Err(ExtractionFailure::NoStructuredOutput.into());
        }
        None => return Err(ExtractionFailure::NoStructuredOutput.into()),
    };

    let issues = parse_issues(&call.arguments)?;
    debug!(count = issues.len(), "extracted issues");
    Ok(issues)
}

/// Decodes the function-call arguments and validates every listed issue.
pub fn parse_issues(arguments: &str) -> Result<Vec<ValidatedIssue>, ExtractionFailure> {
    let parsed: Value = serde_json::from_str(arguments)
        .map_err(|err| ExtractionFailure::MalformedOutput(err.to_string()))?;

    let Value::Object(mut root) = parsed else {
        return Err(ExtractionFailure::MissingIssuesArray);
    };
    let Some(Value::Array(items)) = root.remove(ISSUES_KEY) else {
        return Err(ExtractionFailure::MissingIssuesArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            validate_candidate(CandidateIssue(item))
                .map_err(|violation| ExtractionFailure::SchemaMismatch { index, violation })
        })
        .collect()
}

fn system_prompt(guidance: &str) -> String {
    format!(
        "You are a helpful assistant that analyzes text and creates structured Jira issues. \
         Use the following reference to decide which priority fits each issue and which \
         description template to follow for each issue type.\n\n{guidance}"
    )
}

fn user_prompt(raw_text: &str) -> String {
    format!(
        "Analyze the following text containing tasks or items.\n\
         For each bullet point or distinct item, do the following:\n\
         1. Identify the issue type by choosing one from Bug, Story, Task, or Spike.\n\
         2. Create a clear, concise summary.\n\
         3. Format a detailed description following the appropriate template based on the identified issue type.\n\
         4. Assign a priority of High, Medium, or Low.\n\
         Return a JSON object with a key \"{ISSUES_KEY}\" that is an array of objects. Each object must contain:\n\
         - issue_type (must be one of 'Bug', 'Story', 'Task', or 'Spike'),\n\
         - summary,\n\
         - description,\n\
         - priority (optional, default is 'Medium').\n\
         IMPORTANT: If only one task is provided, the \"{ISSUES_KEY}\" array should contain exactly one object.\n\
         Raw Text:\n{raw_text}\n"
    )
}
