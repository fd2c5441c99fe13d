use async_trait::async_trait;

use crate::domain::contract::FunctionDefinition;
use crate::error::AppResult;

/// A single forced function-call completion.
#[derive(Debug, Clone)]
pub struct FunctionCallRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub function: FunctionDefinition,
}

/// The function invocation returned by the model, arguments still JSON-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

#[async_trait]
pub trait LanguageModelService: Send + Sync {
    /// Returns `None` when the model answered without invoking a function.
    async fn call_function(&self, request: &FunctionCallRequest) -> AppResult<Option<FunctionCall>>;
}
