//! HTTP front end for the promptcraft prompt optimizer.
//!
//! `promptcraft-web` wraps a [`PromptCompiler`] in an axum server. It is a
//! thin transport layer: request parsing, status mapping, CORS, and optional
//! static file serving for the browser frontend.
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use promptcraft::prelude::*;
//! use promptcraft_web::{WebConfig, spawn_web};
//!
//! let rewriter = ChatRewriter::from_config(&RewriterConfig::from_env()?)?;
//! let compiler = PromptCompiler::new(Arc::new(rewriter));
//! let addr = spawn_web(compiler, WebConfig::default()).await?;
//! println!("Listening on http://{addr}");
//! ```
//!
//! # Routes
//!
//! | Route | Description |
//! |-------|-------------|
//! | `POST /optimize?user_prompt=...` | Body `{"target_llm": "gpt", "user_preferences": {}}` → `{"optimized_prompt": "..."}` |
//! | `GET /api/targets` | `{"targets": ["gpt", "claude", "gemini"]}` |
//! | `GET /health` | `ok` |
//!
//! Errors are `{"error": "..."}` with 400 for a missing prompt or unsupported
//! model and 502 when the upstream model fails.

mod api;
mod server;

pub use api::{OptimizeRequest, OptimizeResponse};
pub use server::build_router;

use std::net::SocketAddr;
use std::path::PathBuf;

use promptcraft::compiler::PromptCompiler;

/// Configuration for the web server.
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:8000`.
    pub bind_addr: SocketAddr,
    /// Directory of static frontend files served for unmatched paths.
    ///
    /// If `None`, only the API routes are served.
    pub static_dir: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            static_dir: None,
        }
    }
}

/// Spawn the web server on a Tokio task and return the bound address.
///
/// The server runs until the Tokio runtime shuts down.
pub async fn spawn_web(compiler: PromptCompiler, config: WebConfig) -> std::io::Result<SocketAddr> {
    let router = server::build_router(compiler, config.static_dir);
    server::start_server(router, config.bind_addr).await
}
