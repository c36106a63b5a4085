//! Rewrite a prompt for a target LLM and print the result.
//!
//! Reads the API key from `OPENAI_API_KEY` (a `.env` file in the working
//! directory is loaded first if present).
//!
//! # Examples
//!
//! ```sh
//! # Basic rewrite for Claude
//! promptcraft --target claude --prompt "build a todo app in React"
//!
//! # With preferences (values are parsed as JSON when possible)
//! promptcraft --target gpt --prompt "explain TCP" \
//!   --pref tone=formal --pref depth=Exam-ready --pref 'constraints=["no analogies"]'
//!
//! # Pipe the prompt from stdin
//! cat draft.txt | promptcraft --target gemini --stdin
//!
//! # Inspect the request without calling the API
//! promptcraft --target gpt --prompt "write a haiku" --dry-run
//! ```

use std::io::{self, Read};
use std::process;
use std::sync::Arc;

use clap::Parser;
use promptcraft::compiler::prepare;
use promptcraft::prelude::*;
use promptcraft::templates::supported_identifiers;
use tracing_subscriber::EnvFilter;

/// Rewrite a prompt into the best-practice structure of a target LLM.
#[derive(Parser)]
#[command(name = "promptcraft")]
struct Cli {
    // ── Prompt content ─────────────────────────────────────────
    /// Prompt to optimize
    #[arg(long)]
    prompt: Option<String>,

    /// Read prompt content from stdin
    #[arg(long)]
    stdin: bool,

    /// Target model family: gpt, claude, or gemini (case-insensitive)
    #[arg(long, default_value = "gpt")]
    target: String,

    /// Preference as key=value (repeatable)
    #[arg(long = "pref", value_parser = parse_pref)]
    prefs: Vec<(String, serde_json::Value)>,

    // ── Upstream ───────────────────────────────────────────────
    /// Model that performs the rewrite (overrides PROMPTCRAFT_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Chat-completions endpoint (overrides PROMPTCRAFT_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds (overrides PROMPTCRAFT_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,

    // ── Output mode ────────────────────────────────────────────
    /// Print the system instruction and payload instead of calling the API
    #[arg(long)]
    dry_run: bool,

    /// List supported target identifiers and exit
    #[arg(long)]
    list_targets: bool,
}

/// Parse `key=value`. The value is read as JSON if it parses, otherwise kept
/// as a plain string.
fn parse_pref(raw: &str) -> Result<(String, serde_json::Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty preference key in {raw:?}"));
    }
    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn read_stdin_content() -> Result<String, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {e}"))?;
    Ok(buf)
}

fn build_prompt(cli: &Cli) -> Result<String, String> {
    let stdin_text = if cli.stdin {
        Some(read_stdin_content()?)
    } else {
        None
    };

    match (&cli.prompt, stdin_text) {
        (Some(msg), Some(piped)) => Ok(format!("{msg}\n\n{piped}")),
        (Some(msg), None) => Ok(msg.clone()),
        (None, Some(piped)) => Ok(piped),
        (None, None) => Err("provide --prompt, --stdin, or both".to_string()),
    }
}

fn build_preferences(cli: &Cli) -> Option<UserPreferences> {
    if cli.prefs.is_empty() {
        return None;
    }
    Some(cli.prefs.iter().cloned().collect())
}

fn build_config(cli: &Cli) -> Result<RewriterConfig, String> {
    let mut config = RewriterConfig::from_env()?;
    if let Some(model) = &cli.model {
        config = config.with_model(model);
    }
    if let Some(endpoint) = &cli.endpoint {
        config = config.with_endpoint(endpoint);
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout_secs(secs);
    }
    Ok(config)
}

async fn run(cli: Cli) -> Result<(), String> {
    if cli.list_targets {
        for model in TargetModel::ALL {
            println!("{model}");
        }
        return Ok(());
    }

    // Reject bad targets before touching stdin or the network.
    cli.target
        .parse::<TargetModel>()
        .map_err(|e| format!("{e} (supported: {})", supported_identifiers()))?;

    let prompt = build_prompt(&cli)?;
    let preferences = build_preferences(&cli);

    if cli.dry_run {
        let request = prepare(&prompt, &cli.target, preferences).map_err(|e| e.to_string())?;
        println!(
            "── system ──\n{}\n── user ──\n{}",
            request.system_instruction, request.payload
        );
        return Ok(());
    }

    let config = build_config(&cli)?;
    config.require_api_key()?;
    let rewriter = ChatRewriter::from_config(&config).map_err(|e| e.to_string())?;
    let compiler = PromptCompiler::new(Arc::new(rewriter));

    let optimized = compiler
        .compile(&prompt, &cli.target, preferences)
        .await
        .map_err(|e| e.to_string())?;
    println!("{optimized}");
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
