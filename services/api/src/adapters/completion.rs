//! services/api/src/adapters/completion.rs
//!
//! This module contains the adapter for the chat completion API that writes the
//! study plan. It implements the `CompletionService` port from the `core` crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use study_planner_core::{
    domain::{ChatPrompt, Credential},
    ports::{CompletionService, PortError, PortResult},
};
use tracing::{debug, warn};

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `CompletionService` against an OpenAI-compatible
/// `/v1/chat/completions` endpoint.
#[derive(Clone)]
pub struct OpenAiCompletionClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl OpenAiCompletionClient {
    /// Creates a new `OpenAiCompletionClient`.
    pub fn new(client: reqwest::Client, endpoint: String, model: String) -> Self {
        Self {
            client,
            endpoint,
            model,
        }
    }
}

/// Renders an error body for the banner: compact JSON when it parses, raw text otherwise.
fn describe_error_body(raw: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => value.to_string(),
        Err(_) => raw.trim().to_string(),
    }
}

/// Reads the first choice's message content out of a success body.
fn parse_plan(raw: &str) -> PortResult<String> {
    let response: ChatResponse = serde_json::from_str(raw)
        .map_err(|e| PortError::Unexpected(format!("Failed to parse completion response: {}", e)))?;

    response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| PortError::Unexpected("Completion response contained no choices".to_string()))?
        .message
        .content
        .ok_or_else(|| {
            PortError::Unexpected("Completion response contained no text content".to_string())
        })
}

//=========================================================================================
// `CompletionService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CompletionService for OpenAiCompletionClient {
    async fn complete(
        &self,
        prompt: &ChatPrompt,
        credential: &Credential,
        max_tokens: u32,
    ) -> PortResult<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .bearer_auth(credential.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| PortError::Unexpected(format!("Completion request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PortError::Unexpected(format!("Failed to read completion response: {}", e)))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Completion API returned an error status");
            return Err(PortError::Api {
                status: status.as_u16(),
                body: describe_error_body(&body),
            });
        }

        debug!(bytes = body.len(), "Completion API responded");
        parse_plan(&body)
    }
}
