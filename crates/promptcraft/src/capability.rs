//! The external rewriting capability.
//!
//! [`RewriteCapability`] is the seam between prompt compilation and whatever
//! actually runs the model: given a system instruction and a user payload it
//! returns one completion string, or fails with an [`UpstreamError`].
//! [`ChatRewriter`] is the production implementation over a chat-completions
//! endpoint; [`FnCapability`] wraps a closure for tests and embedding.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::config::RewriterConfig;
use crate::error::UpstreamError;
use crate::{ChatClient, ChatRequest, Message};

/// Boxed future returned by [`RewriteCapability::rewrite`].
pub type RewriteFuture<'a> = Pin<Box<dyn Future<Output = Result<String, UpstreamError>> + Send + 'a>>;

/// Something that can turn a (system instruction, payload) pair into text.
///
/// Uses a boxed future so the trait stays dyn-compatible and can be injected
/// as `Arc<dyn RewriteCapability>`.
pub trait RewriteCapability: Send + Sync {
    /// Run one rewrite. Implementations make at most one upstream attempt.
    fn rewrite<'a>(&'a self, system_instruction: &'a str, payload: &'a str) -> RewriteFuture<'a>;

    /// Short label for logs (model name, "fake", ...).
    fn label(&self) -> &str {
        "rewrite"
    }
}

// ── ChatRewriter ───────────────────────────────────────────────────

/// Rewrites prompts by sending one system and one user message to a
/// chat-completions endpoint.
///
/// The first choice's content is returned exactly as received. Only a
/// response with no content at all is an error.
pub struct ChatRewriter {
    client: ChatClient,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl ChatRewriter {
    pub fn new(client: ChatClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            max_tokens: 0,
            temperature: 0.0,
        }
    }

    /// Build the client and rewriter from a config in one step.
    pub fn from_config(config: &RewriterConfig) -> Result<Self, UpstreamError> {
        let client = ChatClient::from_config(config)?;
        Ok(Self::new(client, &config.model)
            .with_max_tokens(config.max_tokens)
            .with_temperature(config.temperature))
    }

    /// Cap the completion length. `0` leaves it to the provider.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sampling temperature. `0.0` leaves it to the provider.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request(&self, system_instruction: &str, payload: &str) -> ChatRequest {
        ChatRequest {
            model: Some(self.model.clone()),
            messages: vec![Message::system(system_instruction), Message::user(payload)],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            ..Default::default()
        }
    }
}

impl RewriteCapability for ChatRewriter {
    fn rewrite<'a>(&'a self, system_instruction: &'a str, payload: &'a str) -> RewriteFuture<'a> {
        Box::pin(async move {
            let body = self.request(system_instruction, payload);
            let completion = self.client.chat(&body).await?;
            debug!(
                finish_reason = completion.finish_reason.as_deref().unwrap_or("(none)"),
                "rewrite completed"
            );
            completion.content.ok_or(UpstreamError::EmptyResponse)
        })
    }

    fn label(&self) -> &str {
        &self.model
    }
}

// ── FnCapability ───────────────────────────────────────────────────

/// Type-erased async handler for [`FnCapability`].
type ErasedRewriteHandler = Box<
    dyn Fn(String, String) -> Pin<Box<dyn Future<Output = Result<String, UpstreamError>> + Send>>
        + Send
        + Sync,
>;

/// A closure-based capability.
///
/// The handler receives owned copies of the system instruction and payload.
///
/// ```
/// use promptcraft::capability::{FnCapability, RewriteCapability};
///
/// let echo = FnCapability::new(|_system, payload| async move {
///     Ok::<_, promptcraft::UpstreamError>(payload.to_uppercase())
/// });
/// # let rt = tokio::runtime::Runtime::new().unwrap();
/// let out = rt.block_on(echo.rewrite("sys", "hello")).unwrap();
/// assert_eq!(out, "HELLO");
/// ```
pub struct FnCapability {
    handler: ErasedRewriteHandler,
}

impl FnCapability {
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(String, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, UpstreamError>> + Send + 'static,
    {
        let erased = move |system: String,
                           payload: String|
              -> Pin<Box<dyn Future<Output = Result<String, UpstreamError>> + Send>> {
            Box::pin(handler(system, payload))
        };
        Self {
            handler: Box::new(erased),
        }
    }
}

impl RewriteCapability for FnCapability {
    fn rewrite<'a>(&'a self, system_instruction: &'a str, payload: &'a str) -> RewriteFuture<'a> {
        (self.handler)(system_instruction.to_string(), payload.to_string())
    }

    fn label(&self) -> &str {
        "fn"
    }
}
