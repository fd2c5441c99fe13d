use tracing::{info, warn};

use crate::context::AppContext;
use crate::domain::ticket::CreatedTicket;
use crate::error::{AppError, AppResult};
use crate::workflow::extract::extract_issues;

/// Extracts issues from `raw_text` and creates one ticket per issue.
///
/// Tickets are created one at a time in extraction order. The first failure
/// stops the run; tickets created before it stay in the tracker.
pub async fn process_raw_text(ctx: &AppContext, raw_text: &str) -> AppResult<Vec<CreatedTicket>> {
    if raw_text.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "raw_text must not be empty".to_string(),
        ));
    }

    let issues = extract_issues(ctx, raw_text).await?;
    info!(count = issues.len(), "extracted issues from raw text");

    let project_key = &ctx.config.project_key;
    let mut created: Vec<CreatedTicket> = Vec::with_capacity(issues.len());
    for issue in &issues {
        let ticket = match ctx.issue_tracker.create_issue(project_key, issue).await {
            Ok(ticket) => ticket,
            Err(err) => {
                if !created.is_empty() {
                    let keys: Vec<&str> = created.iter().map(|t| t.key.as_str()).collect();
                    warn!(
                        created = ?keys,
                        remaining = issues.len() - created.len(),
                        "aborting after partial ticket creation"
                    );
                }
                return Err(err);
            }
        };

        info!(
            key = %ticket.key,
            url = ticket.url.as_deref().unwrap_or_default(),
            issue_type = %issue.issue_type,
            "created ticket"
        );
        created.push(CreatedTicket::new(ticket, issue));
    }

    Ok(created)
}
