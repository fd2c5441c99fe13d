use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::contract::FunctionDefinition;
use crate::error::{AppError, AppResult};
use crate::services::{FunctionCall, FunctionCallRequest, LanguageModelService};

/// Chat-completions client for OpenAI and API-compatible providers.
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(http: Client, base_url: String, api_key: String, model: String) -> Self {
        Self {
            http,
            base_url,
            api_key,
            model,
        }
    }

    fn completions_endpoint(base_url: &str) -> String {
        format!("{}/chat/completions", base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LanguageModelService for OpenAiClient {
    async fn call_function(
        &self,
        request: &FunctionCallRequest,
    ) -> AppResult<Option<FunctionCall>> {
        let body = ChatCompletionRequest::new(&self.model, request);
        debug!(model = %self.model, function = request.function.name, "requesting function call");

        let response = self
            .http
            .post(Self::completions_endpoint(&self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                AppError::LanguageModel(format!("failed to call language model: {err}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::LanguageModel(format!(
                "language model responded with {status}: {body}"
            )));
        }

        let payload: ChatCompletionResponse = response.json().await.map_err(|err| {
            AppError::LanguageModel(format!("failed to parse language model response: {err}"))
        })?;

        payload.into_function_call()
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    functions: [&'a FunctionDefinition; 1],
    function_call: ForcedFunction<'a>,
}

impl<'a> ChatCompletionRequest<'a> {
    fn new(model: &'a str, request: &'a FunctionCallRequest) -> Self {
        Self {
            model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            functions: [&request.function],
            function_call: ForcedFunction {
                name: request.function.name,
            },
        }
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ForcedFunction<'a> {
    name: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

impl ChatCompletionResponse {
    fn into_function_call(self) -> AppResult<Option<FunctionCall>> {
        let choice = self.choices.into_iter().next().ok_or_else(|| {
            AppError::LanguageModel("language model returned no choices".to_string())
        })?;

        Ok(choice.message.function_call.map(|call| FunctionCall {
            name: call.name,
            arguments: call.arguments,
        }))
    }
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    function_call: Option<ChatFunctionCall>,
}

#[derive(Deserialize)]
struct ChatFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}
