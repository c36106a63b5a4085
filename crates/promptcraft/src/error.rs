//! Error taxonomy for prompt compilation.
//!
//! Two kinds of failure reach callers: the target model is not one we have a
//! template for ([`CompileError::UnsupportedModel`]), or the rewriting
//! capability failed ([`CompileError::UpstreamGeneration`]). Neither is
//! retried or recovered from locally.

/// Failure of the external rewriting capability.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The HTTP client could not be constructed (TLS backend, bad config).
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// The request never produced a response (connection, DNS, timeout).
    #[error("request failed: {0}")]
    Request(String),

    /// The provider answered with a non-2xx status.
    #[error("API HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The provider answered 2xx but with an error object in the body.
    #[error("API error: {0}")]
    Api(String),

    /// The response body was not the expected JSON.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// The response carried no content.
    #[error("empty response from model")]
    EmptyResponse,

    /// Free-form failure from an injected capability.
    #[error("{0}")]
    Other(String),
}

impl UpstreamError {
    /// Whether the failure came from a timeout rather than a refused or
    /// broken connection.
    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Request(msg) if msg.contains("timed out"))
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Request(format!("timed out: {err}"))
        } else {
            UpstreamError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(err: serde_json::Error) -> Self {
        UpstreamError::Parse(err.to_string())
    }
}

/// Error returned by [`PromptCompiler::compile`](crate::compiler::PromptCompiler::compile).
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The target model identifier is outside the supported set.
    #[error("unsupported model: {identifier}")]
    UnsupportedModel { identifier: String },

    /// The rewriting capability failed; wraps the underlying cause.
    #[error("upstream generation failed: {0}")]
    UpstreamGeneration(#[from] UpstreamError),
}

impl CompileError {
    /// True when the caller supplied bad input (maps to a 4xx at an HTTP
    /// boundary); false for dependency failures.
    pub fn is_client_error(&self) -> bool {
        matches!(self, CompileError::UnsupportedModel { .. })
    }
}

/// Result alias for compilation.
pub type Result<T> = std::result::Result<T, CompileError>;
