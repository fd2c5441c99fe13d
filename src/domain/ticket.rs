use serde::{Deserialize, Serialize};

use crate::domain::issue::{IssueType, ValidatedIssue};

/// Reference to an issue as stored by the tracker.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub key: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatus {
    Open,
}

/// What the caller receives for each created issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTicket {
    pub key: String,
    pub summary: String,
    pub issue_type: IssueType,
    pub status: TicketStatus,
}

impl CreatedTicket {
    pub fn new(ticket: Ticket, issue: &ValidatedIssue) -> Self {
        Self {
            key: ticket.key,
            summary: issue.summary.clone(),
            issue_type: issue.issue_type,
            status: TicketStatus::Open,
        }
    }
}
