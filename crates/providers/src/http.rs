//! OpenAI-style chat-completion client.
//!
//! Works with any server exposing the `/v1/chat/completions` shape:
//! Nexa, LM Studio, AnythingLLM, llama.cpp, vLLM.
//!
//! One call is one POST. No retries, no fallback endpoint, no
//! streaming — `ChatModel::stream` keeps its refusing default.

use async_trait::async_trait;
use hearth_core::error::UpstreamError;
use hearth_core::message::{Message, Role};
use hearth_core::model::ChatModel;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Connect/read timeouts are fixed at construction; there is no
/// per-call override.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A chat-completion client for one upstream server.
pub struct HttpChatModel {
    name: String,
    chat_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    client: reqwest::Client,
}

impl HttpChatModel {
    /// Create a client for an arbitrary OpenAI-style endpoint.
    pub fn new(
        name: impl Into<String>,
        chat_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: name.into(),
            chat_url: chat_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens: 256,
            client,
        }
    }

    /// Create a Nexa client (convenience constructor).
    pub fn nexa() -> Self {
        Self::new(
            "nexa",
            "http://127.0.0.1:18181/v1/chat/completions",
            "nexa",
            "NexaAI/Llama3.2-3B-NPU-Turbo",
        )
    }

    /// Create an LM Studio client (convenience constructor).
    pub fn lm_studio() -> Self {
        Self::new(
            "lmstudio",
            "http://127.0.0.1:1234/v1/chat/completions",
            "lm-studio",
            "local-model",
        )
    }

    /// Create an AnythingLLM client (convenience constructor).
    pub fn anything_llm() -> Self {
        Self::new(
            "anythingllm",
            "http://127.0.0.1:3001/api/v1/openai/chat/completions",
            "anythingllm",
            "default-workspace",
        )
    }

    /// Override the chat endpoint URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.chat_url = url.into();
        self
    }

    /// Override the bearer API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    /// Override the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the per-completion token cap.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }

    /// Convert our Message types to the wire format.
    fn to_api_messages(messages: &[Message]) -> Vec<ApiMessage> {
        messages
            .iter()
            .map(|m| ApiMessage {
                role: match m.role {
                    Role::System => "system".into(),
                    Role::User => "user".into(),
                    Role::Assistant => "assistant".into(),
                },
                content: m.content.clone(),
            })
            .collect()
    }
}

#[async_trait]
impl ChatModel for HttpChatModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        messages: &[Message],
        temperature: f32,
    ) -> std::result::Result<String, UpstreamError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": Self::to_api_messages(messages),
            "max_tokens": self.max_tokens,
            "temperature": temperature,
            "stream": false,
        });

        debug!(provider = %self.name, model = %self.model, "Sending completion request");

        let response = self
            .client
            .post(&self.chat_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Upstream returned error");
            return Err(UpstreamError::Api {
                status,
                message: error_body,
            });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::MalformedResponse(e.to_string()))?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| UpstreamError::MalformedResponse("no choices in response".into()))?;

        choice
            .message
            .content
            .ok_or_else(|| UpstreamError::MalformedResponse("completion has no content".into()))
    }
}

// --- Wire types (internal) ---

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ApiChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
