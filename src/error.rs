use std::io;

use thiserror::Error;

use crate::domain::schema::SchemaViolation;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionFailure),
    #[error("language model error: {0}")]
    LanguageModel(String),
    #[error("ticket creation failed: {0}")]
    TicketCreation(String),
    /// Failure talking to a running server from the `submit` command.
    #[error("request failed: {0}")]
    Request(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Reasons the language model output could not be turned into issues.
#[derive(Debug, Error)]
pub enum ExtractionFailure {
    #[error("language model did not return a function call")]
    NoStructuredOutput,
    #[error("function call arguments are not valid JSON: {0}")]
    MalformedOutput(String),
    #[error("function call arguments did not include a valid 'issues' array")]
    MissingIssuesArray,
    #[error("issue #{index} did not match the expected schema: {violation}")]
    SchemaMismatch {
        index: usize,
        violation: SchemaViolation,
    },
}

pub type AppResult<T> = Result<T, AppError>;
