//! Substitute service handles for unit tests.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::issue::ValidatedIssue;
use crate::domain::ticket::Ticket;
use crate::error::{AppError, AppResult};
use crate::services::{
    ContextSource, FunctionCall, FunctionCallRequest, IssueTrackerService, LanguageModelService,
};

pub const GUIDANCE: &str = "Bugs need steps to reproduce. Outages are High priority.";
pub const PROJECT_KEY: &str = "APP";

pub fn test_config() -> AppConfig {
    AppConfig {
        jira_base_url: "https://example.atlassian.net".to_string(),
        jira_email: "dev@example.com".to_string(),
        jira_token: "jira-token".to_string(),
        project_key: PROJECT_KEY.to_string(),
        openai_api_key: "sk-test".to_string(),
        openai_model: "gpt-4".to_string(),
        openai_base_url: "https://api.openai.com/v1".to_string(),
        context_file: PathBuf::from("context.txt"),
        http_timeout: None,
    }
}

pub fn test_context(model: StubLanguageModel) -> (AppContext, RecordingTracker) {
    let tracker = RecordingTracker::default();
    (test_context_with(model, tracker.clone()), tracker)
}

pub fn test_context_with(model: StubLanguageModel, tracker: RecordingTracker) -> AppContext {
    AppContext::new(
        test_config(),
        Arc::new(tracker),
        Arc::new(model),
        Arc::new(StaticContext),
    )
}

#[derive(Clone)]
enum Reply {
    Call(FunctionCall),
    Silent,
    Fail(String),
}

#[derive(Clone)]
pub struct StubLanguageModel {
    reply: Reply,
    requests: Arc<Mutex<Vec<FunctionCallRequest>>>,
}

impl StubLanguageModel {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            requests: Arc::default(),
        }
    }

    /// Calls the issue-creation function with the given JSON arguments.
    pub fn calling(arguments: String) -> Self {
        Self::calling_function(crate::domain::contract::CREATE_ISSUES_FUNCTION, arguments)
    }

    pub fn calling_function(name: &str, arguments: String) -> Self {
        Self::with_reply(Reply::Call(FunctionCall {
            name: name.to_string(),
            arguments,
        }))
    }

    /// Answers in prose without invoking any function.
    pub fn silent() -> Self {
        Self::with_reply(Reply::Silent)
    }

    pub fn failing(message: &str) -> Self {
        Self::with_reply(Reply::Fail(message.to_string()))
    }

    pub fn requests(&self) -> Vec<FunctionCallRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModelService for StubLanguageModel {
    async fn call_function(
        &self,
        request: &FunctionCallRequest,
    ) -> AppResult<Option<FunctionCall>> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Reply::Call(call) => Ok(Some(call.clone())),
            Reply::Silent => Ok(None),
            Reply::Fail(message) => Err(AppError::LanguageModel(message.clone())),
        }
    }
}

/// Records submissions and hands out sequential keys; can reject the n-th call.
#[derive(Clone, Default)]
pub struct RecordingTracker {
    submitted: Arc<Mutex<Vec<(String, ValidatedIssue)>>>,
    attempts: Arc<AtomicUsize>,
    reject_call: Option<usize>,
}

impl RecordingTracker {
    /// Rejects the `call`-th submission (1-based) as Jira would an invalid project.
    pub fn rejecting(call: usize) -> Self {
        Self {
            reject_call: Some(call),
            ..Self::default()
        }
    }

    /// Issues accepted by the tracker, in submission order.
    pub fn created(&self) -> Vec<ValidatedIssue> {
        self.submitted
            .lock()
            .unwrap()
            .iter()
            .map(|(_, issue)| issue.clone())
            .collect()
    }

    /// Every submission, including rejected ones.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn projects(&self) -> Vec<String> {
        self.submitted
            .lock()
            .unwrap()
            .iter()
            .map(|(project, _)| project.clone())
            .collect()
    }
}

#[async_trait]
impl IssueTrackerService for RecordingTracker {
    async fn create_issue(&self, project_key: &str, issue: &ValidatedIssue) -> AppResult<Ticket> {
        let call = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.reject_call == Some(call) {
            return Err(AppError::TicketCreation(
                "Jira responded with 400 Bad Request: project is not valid".to_string(),
            ));
        }
        let mut submitted = self.submitted.lock().unwrap();
        submitted.push((project_key.to_string(), issue.clone()));
        let key = format!("{project_key}-{}", submitted.len());
        Ok(Ticket {
            url: Some(format!("https://example.atlassian.net/browse/{key}")),
            key,
        })
    }
}

pub struct StaticContext;

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve_stub(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// HTTP client that talks to local stubs directly, ignoring proxy settings.
pub fn local_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[async_trait]
impl ContextSource for StaticContext {
    async fn load(&self) -> AppResult<String> {
        Ok(GUIDANCE.to_string())
    }
}
