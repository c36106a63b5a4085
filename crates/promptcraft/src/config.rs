//! Settings for the upstream chat-completions capability.
//!
//! [`RewriterConfig`] carries the endpoint, model, credentials and limits with
//! defaults matching the hosted OpenAI API. [`RewriterConfig::from_env`]
//! layers environment overrides on top; binaries then apply CLI flags.

use std::time::Duration;

/// Default chat-completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Default model used to perform the rewrite.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default per-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const ENDPOINT_ENV: &str = "PROMPTCRAFT_ENDPOINT";
pub const MODEL_ENV: &str = "PROMPTCRAFT_MODEL";
pub const TIMEOUT_ENV: &str = "PROMPTCRAFT_TIMEOUT_SECS";

/// Configuration for [`ChatRewriter`](crate::capability::ChatRewriter).
#[derive(Debug, Clone)]
pub struct RewriterConfig {
    /// Chat-completions URL. Any OpenAI-compatible endpoint works.
    pub endpoint: String,
    /// Model identifier sent upstream. Default: `"gpt-4o-mini"`.
    pub model: String,
    /// Bearer token. Empty means unset.
    pub api_key: String,
    /// Request timeout in seconds. Default: `60`. A timed-out request is not retried.
    pub timeout_secs: u64,
    /// Completion token cap. `0` omits the field.
    pub max_tokens: u32,
    /// Sampling temperature. `0.0` omits the field.
    pub temperature: f32,
}

impl Default for RewriterConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_tokens: 0,
            temperature: 0.0,
        }
    }
}

impl RewriterConfig {
    /// Defaults overridden by `OPENAI_API_KEY`, `PROMPTCRAFT_ENDPOINT`,
    /// `PROMPTCRAFT_MODEL` and `PROMPTCRAFT_TIMEOUT_SECS` where set.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut config = Self::default();
        if let Some(key) = lookup(API_KEY_ENV) {
            config.api_key = key;
        }
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.is_empty()) {
            config.endpoint = endpoint;
        }
        if let Some(model) = lookup(MODEL_ENV).filter(|v| !v.is_empty()) {
            config.model = model;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            config.timeout_secs = raw
                .trim()
                .parse()
                .map_err(|_| format!("{TIMEOUT_ENV} must be a whole number of seconds, got {raw:?}"))?;
        }
        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Fail early when a live rewrite would be impossible.
    pub fn require_api_key(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            Err(format!("Set {API_KEY_ENV} to your API key"))
        } else {
            Ok(())
        }
    }
}
