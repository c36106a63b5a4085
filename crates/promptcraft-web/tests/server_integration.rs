//! Integration tests for the promptcraft-web server.
//!
//! These tests start a real axum server on a random port, backed by a
//! closure capability, and exercise the HTTP endpoints with reqwest.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use promptcraft::UpstreamError;
use promptcraft::capability::FnCapability;
use promptcraft::compiler::PromptCompiler;
use promptcraft::instruction::system_instruction;
use promptcraft_web::{OptimizeResponse, WebConfig, spawn_web};

/// What the fake capability saw.
#[derive(Default)]
struct Seen {
    calls: AtomicUsize,
    last: Mutex<Option<(String, String)>>,
}

/// Helper: spawn a test server on port 0 whose capability answers `reply`.
async fn spawn_test_server(reply: Result<&'static str, &'static str>) -> (Arc<Seen>, String) {
    let seen = Arc::new(Seen::default());
    let recorder = seen.clone();

    let capability = FnCapability::new(move |system, payload| {
        recorder.calls.fetch_add(1, Ordering::SeqCst);
        *recorder.last.lock().unwrap() = Some((system, payload));
        async move {
            reply
                .map(str::to_string)
                .map_err(|e| UpstreamError::Other(e.to_string()))
        }
    });

    let config = WebConfig {
        bind_addr: ([127, 0, 0, 1], 0).into(),
        ..Default::default()
    };
    let addr = spawn_web(PromptCompiler::new(Arc::new(capability)), config)
        .await
        .unwrap();
    (seen, format!("http://{addr}"))
}

fn sent_payload(seen: &Seen) -> serde_json::Value {
    let last = seen.last.lock().unwrap();
    let (_, payload) = last.as_ref().expect("capability was called");
    serde_json::from_str(payload.strip_prefix("INPUT_PAYLOAD:\n").unwrap()).unwrap()
}

// ── /optimize ────────────────────────────────────────────────────────

#[tokio::test]
async fn optimize_returns_capability_text() {
    let (seen, base) = spawn_test_server(Ok("ROLE:\nYou are a React expert.\n")).await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!(
            "{base}/optimize?user_prompt=build%20a%20todo%20app%20in%20React"
        ))
        .json(&serde_json::json!({"target_llm": "gpt", "user_preferences": {}}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: OptimizeResponse = resp.json().await.unwrap();
    assert_eq!(body.optimized_prompt, "ROLE:\nYou are a React expert.\n");

    assert_eq!(seen.calls.load(Ordering::SeqCst), 1);
    let payload = sent_payload(&seen);
    assert_eq!(payload["target_llm"], "gpt");
    assert_eq!(payload["raw_user_prompt"], "build a todo app in React");
    assert_eq!(payload["user_preferences"], serde_json::json!({}));

    let last = seen.last.lock().unwrap();
    assert_eq!(last.as_ref().unwrap().0, system_instruction());
}

#[tokio::test]
async fn optimize_accepts_prompt_in_body_and_mixed_case_target() {
    let (seen, base) = spawn_test_server(Ok("rewritten")).await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/optimize"))
        .json(&serde_json::json!({
            "target_llm": "Claude",
            "user_prompt": "summarize this paper",
            "user_preferences": {"tone": "academic", "depth": "Advanced"}
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let payload = sent_payload(&seen);
    assert_eq!(payload["target_llm"], "claude");
    assert_eq!(
        payload["user_preferences"],
        serde_json::json!({"tone": "academic", "depth": "Advanced"})
    );
}

#[tokio::test]
async fn unsupported_model_is_400_without_upstream_call() {
    let (seen, base) = spawn_test_server(Ok("never")).await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/optimize?user_prompt=hello"))
        .json(&serde_json::json!({"target_llm": "llama"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("llama"));
    assert_eq!(seen.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn upstream_failure_is_502() {
    let (seen, base) = spawn_test_server(Err("invalid api key")).await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/optimize?user_prompt=hello"))
        .json(&serde_json::json!({"target_llm": "gemini"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 502);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("invalid api key"));
    assert_eq!(seen.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_prompt_is_400() {
    let (seen, base) = spawn_test_server(Ok("never")).await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/optimize"))
        .json(&serde_json::json!({"target_llm": "gpt"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(seen.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_body_is_400_with_json_error() {
    let (seen, base) = spawn_test_server(Ok("never")).await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/optimize?user_prompt=hello"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
    assert_eq!(seen.calls.load(Ordering::SeqCst), 0);
}

// ── Other routes ─────────────────────────────────────────────────────

#[tokio::test]
async fn targets_lists_supported_models() {
    let (_seen, base) = spawn_test_server(Ok("unused")).await;

    let resp = reqwest::get(format!("{base}/api/targets")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["targets"], serde_json::json!(["gpt", "claude", "gemini"]));
}

#[tokio::test]
async fn health_is_ok() {
    let (_seen, base) = spawn_test_server(Ok("unused")).await;

    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "ok");
}
