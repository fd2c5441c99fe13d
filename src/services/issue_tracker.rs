use async_trait::async_trait;

use crate::domain::issue::ValidatedIssue;
use crate::domain::ticket::Ticket;
use crate::error::AppResult;

#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    async fn create_issue(&self, project_key: &str, issue: &ValidatedIssue) -> AppResult<Ticket>;
}
