use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::issue::ValidatedIssue;
use crate::domain::ticket::Ticket;
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

pub struct JiraClient {
    http: Client,
    base_url: String,
    email: String,
    token: String,
}

impl JiraClient {
    pub fn new(http: Client, base_url: String, email: String, token: String) -> Self {
        Self {
            http,
            base_url,
            email,
            token,
        }
    }

    fn auth_header(email: &str, token: &str) -> String {
        let credentials = format!("{email}:{token}");
        let encoded = BASE64_STANDARD.encode(credentials);
        format!("Basic {encoded}")
    }

    fn issue_endpoint(base_url: &str) -> String {
        format!("{}/rest/api/3/issue", base_url.trim_end_matches('/'))
    }

    fn browse_url(base_url: &str, key: &str) -> String {
        format!("{}/browse/{}", base_url.trim_end_matches('/'), key)
    }
}

#[async_trait]
impl IssueTrackerService for JiraClient {
    async fn create_issue(&self, project_key: &str, issue: &ValidatedIssue) -> AppResult<Ticket> {
        let project_key = project_key.trim();
        if project_key.is_empty() {
            return Err(AppError::TicketCreation(
                "project key must not be empty".to_string(),
            ));
        }

        let request_body = JiraCreateIssueRequest::new(project_key, issue);
        debug!(
            project = project_key,
            issue_type = %issue.issue_type,
            priority = %issue.priority,
            "creating Jira issue"
        );

        let response = self
            .http
            .post(Self::issue_endpoint(&self.base_url))
            .header(AUTHORIZATION, Self::auth_header(&self.email, &self.token))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|err| AppError::TicketCreation(format!("failed to call Jira: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::TicketCreation(format!(
                "Jira responded with {status}: {body}"
            )));
        }

        let payload: JiraCreateIssueResponse = response.json().await.map_err(|err| {
            AppError::TicketCreation(format!("failed to parse Jira response: {err}"))
        })?;

        let url = Self::browse_url(&self.base_url, &payload.key);
        Ok(Ticket {
            key: payload.key,
            url: Some(url),
        })
    }
}

#[derive(Serialize)]
struct JiraCreateIssueRequest {
    fields: JiraCreateIssueFields,
}

impl JiraCreateIssueRequest {
    fn new(project_key: &str, issue: &ValidatedIssue) -> Self {
        Self {
            fields: JiraCreateIssueFields {
                project: JiraProject {
                    key: project_key.to_string(),
                },
                summary: issue.summary.clone(),
                description: JiraDescription::from_markdown(&issue.description),
                issuetype: JiraNamed::new(issue.issue_type.as_str()),
                priority: JiraNamed::new(issue.priority.as_str()),
            },
        }
    }
}

#[derive(Serialize)]
struct JiraCreateIssueFields {
    project: JiraProject,
    summary: String,
    description: JiraDescription,
    issuetype: JiraNamed,
    priority: JiraNamed,
}

#[derive(Serialize)]
struct JiraProject {
    key: String,
}

#[derive(Serialize)]
struct JiraNamed {
    name: &'static str,
}

impl JiraNamed {
    fn new(name: &'static str) -> Self {
        Self { name }
    }
}

/// Atlassian Document Format body. Blank lines separate paragraphs and single
/// newlines become hard breaks, so the text reaches Jira unchanged.
#[derive(Serialize)]
struct JiraDescription {
    #[serde(rename = "type")]
    doc_type: &'static str,
    version: u8,
    content: Vec<JiraDocNode>,
}

impl JiraDescription {
    fn from_markdown(description: &str) -> Self {
        let cleaned = description.replace("\r\n", "\n").replace('\r', "\n");
        let content = cleaned
            .split("\n\n")
            .map(|section| section.trim_matches('\n'))
            .filter(|section| !section.trim().is_empty())
            .map(JiraDocNode::paragraph)
            .collect();

        Self {
            doc_type: "doc",
            version: 1,
            content,
        }
    }
}

#[derive(Serialize)]
struct JiraDocNode {
    #[serde(rename = "type")]
    node_type: &'static str,
    content: Vec<JiraInline>,
}

impl JiraDocNode {
    fn paragraph(section: &str) -> Self {
        let mut content = Vec::new();
        for (index, line) in section.split('\n').enumerate() {
            if index > 0 {
                content.push(JiraInline::HardBreak);
            }
            // ADF rejects empty text nodes.
            if !line.is_empty() {
                content.push(JiraInline::Text {
                    text: line.to_string(),
                });
            }
        }

        Self {
            node_type: "paragraph",
            content,
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum JiraInline {
    Text { text: String },
    HardBreak,
}

#[derive(Deserialize)]
struct JiraCreateIssueResponse {
    key: String,
}
