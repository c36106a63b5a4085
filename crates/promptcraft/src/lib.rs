//! Rewrite a raw prompt into the best-practice structure of a target LLM.
//!
//! `promptcraft` pairs a fixed rewriting instruction with a structured
//! payload (target model, that model's best-practice template, the raw
//! prompt, and caller preferences) and hands both to an upstream model that
//! performs the rewrite. It never answers the prompt itself.
//!
//! # Getting started
//!
//! ```ignore
//! use std::sync::Arc;
//! use promptcraft::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RewriterConfig::from_env()?;
//!     let rewriter = ChatRewriter::from_config(&config)?;
//!     let compiler = PromptCompiler::new(Arc::new(rewriter));
//!
//!     let optimized = compiler
//!         .compile("build a todo app in React", "claude", None)
//!         .await?;
//!     println!("{optimized}");
//!     Ok(())
//! }
//! ```
//!
//! # Where to find things
//!
//! - **Templates and supported targets:** [`templates`] — [`TargetModel`]
//!   and [`templates::resolve`].
//! - **The rewriting instruction:** [`instruction::system_instruction`].
//! - **Payload wire format:** [`payload::CompilationPayload`].
//! - **Compilation:** [`PromptCompiler`](compiler::PromptCompiler).
//! - **Plugging in a model:** implement
//!   [`RewriteCapability`](capability::RewriteCapability), or use
//!   [`ChatRewriter`](capability::ChatRewriter) over [`ChatClient`], or
//!   [`FnCapability`](capability::FnCapability) for a closure.
//! - **Errors:** [`CompileError`] and [`UpstreamError`].

pub mod capability;
pub mod compiler;
pub mod config;
pub mod error;
pub mod instruction;
pub mod payload;
pub mod prelude;
pub mod telemetry;
pub mod templates;

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

pub use error::{CompileError, UpstreamError};
pub use templates::TargetModel;

use config::RewriterConfig;

// ── Request types ──────────────────────────────────────────────────

/// Chat completion request body. Unset optional fields are omitted from
/// serialization.
#[derive(Serialize, Debug, Default)]
pub struct ChatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    pub messages: Vec<Message>,

    #[serde(skip_serializing_if = "is_zero_u32")]
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "is_zero_f32")]
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn is_zero_u32(v: &u32) -> bool {
    *v == 0
}
fn is_zero_f32(v: &f32) -> bool {
    *v == 0.0
}

// ── Message types ──────────────────────────────────────────────────

/// Role of a message in the conversation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A message in the exchange.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

// ── Response types ─────────────────────────────────────────────────

/// Raw API response (internal deserialization target).
#[derive(Deserialize, Debug)]
struct RawChatResponse {
    choices: Option<Vec<RawChoice>>,
    error: Option<ApiErrorResponse>,
    #[serde(default)]
    usage: Option<UsageInfo>,
}

#[derive(Deserialize, Debug)]
struct RawChoice {
    message: RawResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorResponse {
    message: String,
}

/// Clean return type from [`ChatClient::chat`].
#[derive(Debug)]
pub struct ChatCompletion {
    pub content: Option<String>,
    pub usage: Option<UsageInfo>,
    pub finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Deserialize, Debug, Clone)]
pub struct UsageInfo {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

/// Parse a chat-completions response body.
///
/// A 2xx body may still carry an `error` object; that becomes
/// [`UpstreamError::Api`]. A body with no choices yields a completion with no
/// content.
pub fn parse_chat_response(text: &str) -> Result<ChatCompletion, UpstreamError> {
    let parsed: RawChatResponse = serde_json::from_str(text)?;

    if let Some(err) = parsed.error {
        return Err(UpstreamError::Api(err.message));
    }

    let choice = parsed.choices.and_then(|c| c.into_iter().next());
    Ok(match choice {
        Some(c) => ChatCompletion {
            content: c.message.content,
            usage: parsed.usage,
            finish_reason: c.finish_reason,
        },
        None => ChatCompletion {
            content: None,
            usage: parsed.usage,
            finish_reason: None,
        },
    })
}

// ── Client ─────────────────────────────────────────────────────────

/// Async HTTP client for an OpenAI-compatible chat completions endpoint.
pub struct ChatClient {
    pub(crate) client: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) endpoint: String,
}

impl ChatClient {
    /// Create a client for the default endpoint with a 60s timeout.
    pub fn new(api_key: impl Into<String>) -> Result<Self, UpstreamError> {
        Self::with_endpoint(
            api_key,
            config::DEFAULT_ENDPOINT,
            Duration::from_secs(config::DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create a client for a specific endpoint and timeout.
    pub fn with_endpoint(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("promptcraft/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Client(e.to_string()))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &RewriterConfig) -> Result<Self, UpstreamError> {
        Self::with_endpoint(&config.api_key, &config.endpoint, config.timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a chat completion request. One attempt, no retry.
    pub async fn chat(&self, body: &ChatRequest) -> Result<ChatCompletion, UpstreamError> {
        let model_label = body.model.as_deref().unwrap_or("(none)");
        debug!(
            "LLM request: model={}, messages={}, max_tokens={}, temp={}",
            model_label,
            body.messages.len(),
            body.max_tokens,
            body.temperature,
        );
        trace!(
            "Request payload size: {} bytes",
            serde_json::to_string(body).map_or(0, |s| s.len())
        );

        let start = Instant::now();

        let mut request = self.client.post(&self.endpoint).json(body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }
        let resp = request.send().await?;

        let status = resp.status();
        let text = resp.text().await?;

        debug!(
            "LLM response: HTTP {} in {:.1}s ({} bytes)",
            status,
            start.elapsed().as_secs_f64(),
            text.len()
        );

        if !status.is_success() {
            return Err(UpstreamError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let completion = parse_chat_response(&text)?;

        if let Some(ref usage) = completion.usage {
            let prompt = usage.prompt_tokens.unwrap_or(0);
            let completion_tokens = usage.completion_tokens.unwrap_or(0);
            debug!(
                "Token usage: prompt={}, completion={}, total={}, est_cost=${:.5}",
                prompt,
                completion_tokens,
                usage.total_tokens.unwrap_or(0),
                telemetry::pricing_for_model(model_label).estimate_cost(prompt, completion_tokens),
            );
        }

        Ok(completion)
    }
}
