//! REST endpoint handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use promptcraft::compiler::PromptCompiler;
use promptcraft::payload::UserPreferences;
use promptcraft::{CompileError, TargetModel};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub compiler: PromptCompiler,
}

/// Query string for POST /optimize.
#[derive(Deserialize, Default)]
pub struct OptimizeQuery {
    pub user_prompt: Option<String>,
}

/// Request body for POST /optimize.
#[derive(Deserialize)]
pub struct OptimizeRequest {
    pub target_llm: String,
    #[serde(default)]
    pub user_preferences: Option<UserPreferences>,
    /// Alternative to the `user_prompt` query parameter.
    #[serde(default)]
    pub user_prompt: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct OptimizeResponse {
    pub optimized_prompt: String,
}

/// JSON error body with the status it maps to.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<CompileError> for ApiError {
    fn from(err: CompileError) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::BAD_GATEWAY
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

/// POST /optimize — Rewrite a prompt for a target model.
///
/// The prompt comes from the `user_prompt` query parameter or, failing
/// that, the body field of the same name. Returns 400 for a malformed body,
/// missing prompt or unsupported model and 502 when the upstream model fails.
pub async fn post_optimize(
    State(app): State<AppState>,
    Query(query): Query<OptimizeQuery>,
    body: Result<Json<OptimizeRequest>, JsonRejection>,
) -> Result<Json<OptimizeResponse>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let prompt = query
        .user_prompt
        .or(body.user_prompt)
        .ok_or_else(|| ApiError::bad_request("missing user_prompt"))?;

    let optimized = match app
        .compiler
        .compile(&prompt, &body.target_llm, body.user_preferences)
        .await
    {
        Ok(text) => text,
        Err(e) => {
            warn!(target_llm = %body.target_llm, error = %e, "optimize failed");
            return Err(e.into());
        }
    };

    info!(target_llm = %body.target_llm, "optimize succeeded");
    Ok(Json(OptimizeResponse {
        optimized_prompt: optimized,
    }))
}

/// GET /api/targets — Supported target identifiers.
pub async fn get_targets() -> Json<serde_json::Value> {
    let targets: Vec<&str> = TargetModel::ALL.iter().map(|m| m.as_str()).collect();
    Json(serde_json::json!({ "targets": targets }))
}

/// GET /health — Liveness probe.
pub async fn get_health() -> &'static str {
    "ok"
}
