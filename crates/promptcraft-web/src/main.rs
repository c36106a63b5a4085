//! Prompt optimizer HTTP server.
//!
//! # Usage
//!
//! ```bash
//! OPENAI_API_KEY=sk-... cargo run -p promptcraft-web
//! OPENAI_API_KEY=sk-... cargo run -p promptcraft-web -- --port 8080
//! OPENAI_API_KEY=sk-... cargo run -p promptcraft-web -- --static-dir frontend
//! ```
//!
//! Then:
//!
//! ```bash
//! curl -X POST 'http://127.0.0.1:8000/optimize?user_prompt=build%20a%20todo%20app' \
//!   -H 'content-type: application/json' \
//!   -d '{"target_llm": "claude", "user_preferences": {"depth": "Advanced"}}'
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use promptcraft::prelude::*;
use promptcraft_web::{WebConfig, spawn_web};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Prompt optimizer HTTP server.
#[derive(Parser)]
#[command(about = "Serve the prompt optimizer over HTTP")]
struct Args {
    /// Interface to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: std::net::IpAddr,

    /// Port to listen on.
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Directory of static frontend files to serve.
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Model that performs the rewrite (overrides PROMPTCRAFT_MODEL).
    #[arg(long)]
    model: Option<String>,

    /// Chat-completions endpoint (overrides PROMPTCRAFT_ENDPOINT).
    #[arg(long)]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // 1. Upstream configuration: env, then flags.
    let mut config = RewriterConfig::from_env()?;
    if let Some(model) = args.model {
        config = config.with_model(model);
    }
    if let Some(endpoint) = args.endpoint {
        config = config.with_endpoint(endpoint);
    }
    config.require_api_key()?;

    // 2. Compiler over the chat-completions rewriter.
    let rewriter = ChatRewriter::from_config(&config).map_err(|e| e.to_string())?;
    let compiler = PromptCompiler::new(Arc::new(rewriter));

    // 3. Serve.
    let web_config = WebConfig {
        bind_addr: (args.host, args.port).into(),
        static_dir: args.static_dir,
    };
    let addr = spawn_web(compiler, web_config)
        .await
        .map_err(|e| format!("failed to bind: {e}"))?;
    info!(model = %config.model, "listening on http://{addr}");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("failed to listen for shutdown signal: {e}"))?;
    info!("shutting down");
    Ok(())
}
