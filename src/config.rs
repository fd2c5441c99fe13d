use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const JIRA_URL: &str = "JIRA_URL";
pub const JIRA_EMAIL: &str = "JIRA_EMAIL";
pub const JIRA_API_TOKEN: &str = "JIRA_API_TOKEN";
pub const JIRA_PROJECT_KEY: &str = "JIRA_PROJECT_KEY";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const CONTEXT_FILE: &str = "TICKETSMITH_CONTEXT_FILE";
pub const HTTP_TIMEOUT_SECS: &str = "TICKETSMITH_HTTP_TIMEOUT_SECS";

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CONTEXT_FILE: &str = "context.txt";

/// An environment variable the service reads, as listed by `config show`.
pub struct EnvVar {
    pub name: &'static str,
    pub secret: bool,
    pub default: Option<&'static str>,
}

pub const ENV_VARS: [EnvVar; 9] = [
    EnvVar {
        name: JIRA_URL,
        secret: false,
        default: None,
    },
    EnvVar {
        name: JIRA_EMAIL,
        secret: false,
        default: None,
    },
    EnvVar {
        name: JIRA_API_TOKEN,
        secret: true,
        default: None,
    },
    EnvVar {
        name: JIRA_PROJECT_KEY,
        secret: false,
        default: None,
    },
    EnvVar {
        name: OPENAI_API_KEY,
        secret: true,
        default: None,
    },
    EnvVar {
        name: OPENAI_MODEL,
        secret: false,
        default: Some(DEFAULT_OPENAI_MODEL),
    },
    EnvVar {
        name: OPENAI_BASE_URL,
        secret: false,
        default: Some(DEFAULT_OPENAI_BASE_URL),
    },
    EnvVar {
        name: CONTEXT_FILE,
        secret: false,
        default: Some(DEFAULT_CONTEXT_FILE),
    },
    EnvVar {
        name: HTTP_TIMEOUT_SECS,
        secret: false,
        default: None,
    },
];

/// Loads variables from a dotenv file into the process environment.
///
/// Without an explicit path, `.env` is searched for from the working
/// directory upwards and a missing file is ignored. An explicit path must
/// exist. Variables already set in the environment are never overridden.
pub fn load_env_file(path: Option<&Path>) -> AppResult<Option<PathBuf>> {
    match path {
        Some(path) => {
            dotenvy::from_path(path).map_err(|err| {
                AppError::Configuration(format!(
                    "failed to load env file {}: {err}",
                    path.display()
                ))
            })?;
            Ok(Some(path.to_path_buf()))
        }
        None => match dotenvy::dotenv() {
            Ok(found) => Ok(Some(found)),
            Err(err) if err.not_found() => Ok(None),
            Err(err) => Err(AppError::Configuration(format!(
                "failed to load .env: {err}"
            ))),
        },
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jira_base_url: String,
    pub jira_email: String,
    pub jira_token: String,
    pub project_key: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: String,
    pub context_file: PathBuf,
    pub http_timeout: Option<Duration>,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable lookup. Every missing
    /// required variable is reported in a single error.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut missing = Vec::new();
        let mut required = |name: &'static str| {
            value(name).unwrap_or_else(|| {
                missing.push(name);
                String::new()
            })
        };

        let jira_base_url = required(JIRA_URL);
        let jira_email = required(JIRA_EMAIL);
        let jira_token = required(JIRA_API_TOKEN);
        let project_key = required(JIRA_PROJECT_KEY);
        let openai_api_key = required(OPENAI_API_KEY);

        if !missing.is_empty() {
            return Err(AppError::Configuration(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let http_timeout = match value(HTTP_TIMEOUT_SECS) {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| {
                    AppError::Configuration(format!(
                        "{HTTP_TIMEOUT_SECS} must be a whole number of seconds, got '{raw}'"
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            jira_base_url,
            jira_email,
            jira_token,
            project_key,
            openai_api_key,
            openai_model: value(OPENAI_MODEL).unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            openai_base_url: value(OPENAI_BASE_URL)
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            context_file: value(CONTEXT_FILE)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTEXT_FILE)),
            http_timeout,
        })
    }

    /// Shared HTTP client for the outbound integrations.
    pub fn http_client(&self) -> AppResult<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.http_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))
    }
}
