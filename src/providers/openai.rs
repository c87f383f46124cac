//! OpenAI-compatible chat-completions backend.
//!
//! Speaks `POST {base_url}/chat/completions`. Streaming responses are
//! server-sent events whose `data:` payloads carry `choices[0].delta`
//! fragments, terminated by a literal `[DONE]`.

use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures::{StreamExt, future};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GenerationBackend, GenerationRequest, ProviderError, TokenStream};
use crate::config::ResolvedCredentials;

/// Backend for any endpoint implementing the OpenAI chat API.
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for OpenAiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiBackend")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ResponseChoice>,
}

#[derive(Deserialize)]
struct ResponseChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
}

#[derive(Deserialize, Default)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl OpenAiBackend {
    pub fn new(credentials: &ResolvedCredentials) -> Result<Self, ProviderError> {
        if credentials.api_key.trim().is_empty() {
            return Err(ProviderError::NotConfigured("API key is empty".into()));
        }
        let client = reqwest::Client::builder()
            .user_agent(format!(
                "{}/{}",
                crate::constants::APP_NAME,
                crate::constants::VERSION
            ))
            .build()?;
        Ok(Self {
            client,
            api_key: credentials.api_key.clone(),
            base_url: credentials.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    async fn send(
        &self,
        request: &GenerationRequest,
        stream: bool,
    ) -> Result<reqwest::Response, ProviderError> {
        let body = ChatRequest {
            model: &request.model,
            messages: [ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream,
        };

        debug!(
            model = %request.model,
            stream,
            prompt_chars = request.prompt.chars().count(),
            "sending chat completion request"
        );

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&text)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| {
                if text.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                } else {
                    text.trim().to_string()
                }
            });
        Err(ProviderError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Extract the delta text from one SSE `data:` payload.
fn parse_delta(data: &str) -> Result<Option<String>, ProviderError> {
    let chunk: StreamChunk = serde_json::from_str(data)
        .map_err(|e| ProviderError::Stream(format!("invalid event payload: {e}")))?;
    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.delta.content)
        .filter(|t| !t.is_empty()))
}

#[async_trait]
impl GenerationBackend for OpenAiBackend {
    async fn complete(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        let resp = self.send(request, false).await?;
        let body: ChatResponse = resp.json().await?;
        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content.unwrap_or_default())
            .ok_or_else(|| ProviderError::Stream("response contained no choices".into()))
    }

    async fn stream(&self, request: &GenerationRequest) -> Result<TokenStream, ProviderError> {
        let resp = self.send(request, true).await?;

        let tokens = resp
            .bytes_stream()
            .eventsource()
            .take_while(|event| {
                future::ready(!matches!(event, Ok(e) if e.data.trim() == "[DONE]"))
            })
            .filter_map(|event| async move {
                match event {
                    Err(e) => Some(Err(ProviderError::Stream(e.to_string()))),
                    Ok(e) if e.data.trim().is_empty() => None,
                    Ok(e) => parse_delta(&e.data).transpose(),
                }
            })
            .boxed();

        Ok(tokens)
    }
}
