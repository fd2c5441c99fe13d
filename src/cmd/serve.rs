use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::context_file::ContextFile;
use crate::infra::jira::JiraClient;
use crate::infra::openai::OpenAiClient;
use crate::server;
use crate::services::ContextSource;

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on.
    #[arg(long, env = "TICKETSMITH_BIND", default_value = "0.0.0.0:8000")]
    pub bind: String,
    /// Context document injected into every extraction prompt.
    #[arg(long)]
    pub context_file: Option<PathBuf>,
}

pub async fn run(args: ServeArgs) -> AppResult<()> {
    let mut config = AppConfig::from_env()?;
    if let Some(path) = args.context_file {
        config.context_file = path;
    }

    let context_source = ContextFile::new(config.context_file.clone());
    // Refuse to start without a readable context document.
    context_source.load().await?;

    let http = config.http_client()?;
    let issue_tracker = Arc::new(JiraClient::new(
        http.clone(),
        config.jira_base_url.clone(),
        config.jira_email.clone(),
        config.jira_token.clone(),
    ));
    let language_model = Arc::new(OpenAiClient::new(
        http,
        config.openai_base_url.clone(),
        config.openai_api_key.clone(),
        config.openai_model.clone(),
    ));

    info!(
        project = %config.project_key,
        model = %config.openai_model,
        context_file = %context_source.path().display(),
        "configuration loaded"
    );

    let ctx = AppContext::new(config, issue_tracker, language_model, Arc::new(context_source));
    server::serve(ctx, &args.bind).await
}
