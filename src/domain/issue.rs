use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueType {
    Bug,
    Story,
    Task,
    Spike,
}

impl IssueType {
    pub const ALL: [IssueType; 4] = [
        IssueType::Bug,
        IssueType::Story,
        IssueType::Task,
        IssueType::Spike,
    ];

    /// Used when the model leaves the type out.
    pub const FALLBACK: IssueType = IssueType::Task;

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Bug => "Bug",
            IssueType::Story => "Story",
            IssueType::Task => "Task",
            IssueType::Spike => "Spike",
        }
    }

    /// Matches the exact Jira issue type name.
    pub fn from_str(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|priority| priority.as_str() == value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An issue as the model produced it, before any normalisation.
#[derive(Debug, Clone)]
pub struct CandidateIssue(pub serde_json::Value);

/// An issue that passed schema validation and is safe to send to the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedIssue {
    pub issue_type: IssueType,
    pub summary: String,
    pub description: String,
    pub priority: Priority,
}
