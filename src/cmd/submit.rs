use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use reqwest::Client;

use crate::domain::ticket::CreatedTicket;
use crate::error::{AppError, AppResult};
use crate::server::error::ErrorResponse;
use crate::server::routes::RawTextRequest;

#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    /// Base URL of a running ticketsmith server.
    #[arg(long, default_value = "http://localhost:8000")]
    pub url: String,
    /// Read the raw text from a file.
    #[arg(short, long, conflicts_with = "text")]
    pub file: Option<PathBuf>,
    /// Seconds to wait for the server; extraction of long lists is slow.
    #[arg(long, default_value_t = 60)]
    pub timeout: u64,
    /// Raw text to turn into tickets.
    pub text: Option<String>,
}

pub async fn run(args: SubmitArgs) -> AppResult<Vec<CreatedTicket>> {
    let raw_text = match (args.file, args.text) {
        (Some(path), _) => tokio::fs::read_to_string(path).await?,
        (None, Some(text)) => text,
        (None, None) => {
            return Err(AppError::InvalidInput(
                "provide the raw text as an argument or with --file".to_string(),
            ));
        }
    };

    let client = Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()
        .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))?;

    let response = client
        .post(endpoint(&args.url))
        .json(&RawTextRequest { raw_text })
        .send()
        .await
        .map_err(|err| AppError::Request(format!("failed to reach {}: {err}", args.url)))?;

    let status = response.status();
    if !status.is_success() {
        let detail = match response.json::<ErrorResponse>().await {
            Ok(body) => body.detail,
            Err(_) => "<no detail>".to_string(),
        };
        return Err(AppError::Request(format!("server responded with {status}: {detail}")));
    }

    response
        .json()
        .await
        .map_err(|err| AppError::Request(format!("failed to parse server response: {err}")))
}

fn endpoint(base_url: &str) -> String {
    format!("{}/process-tasks/", base_url.trim_end_matches('/'))
}

pub fn format_ticket(ticket: &CreatedTicket) -> String {
    format!(
        "{} [{}] {} ({:?})",
        ticket.key, ticket.issue_type, ticket.summary, ticket.status
    )
}
