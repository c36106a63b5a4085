//! Prompt compilation: template lookup, payload assembly, one upstream call.

use std::sync::Arc;
use std::time::Instant;

use tracing::{Instrument, debug, info, info_span, warn};

use crate::capability::RewriteCapability;
use crate::error::CompileError;
use crate::instruction::system_instruction;
use crate::payload::{CompilationPayload, UserPreferences};
use crate::telemetry::generate_request_id;
use crate::templates::TargetModel;

/// The two strings that make up one rewrite request.
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteRequest {
    pub system_instruction: &'static str,
    pub payload: String,
}

/// Turns raw prompts into prompts shaped for a target model.
///
/// Cheap to clone; clones share the capability. Holds no mutable state, so
/// any number of `compile` calls may run concurrently.
#[derive(Clone)]
pub struct PromptCompiler {
    capability: Arc<dyn RewriteCapability>,
}

impl PromptCompiler {
    pub fn new(capability: Arc<dyn RewriteCapability>) -> Self {
        Self { capability }
    }

    /// Build the system instruction and rendered payload without calling
    /// the capability.
    pub fn prepare(
        &self,
        raw_prompt: &str,
        target_model: &str,
        preferences: Option<UserPreferences>,
    ) -> Result<RewriteRequest, CompileError> {
        prepare(raw_prompt, target_model, preferences)
    }

    /// Rewrite `raw_prompt` for `target_model`.
    ///
    /// An unsupported model fails before any upstream call. Otherwise the
    /// capability is invoked exactly once and its text is returned as-is.
    pub async fn compile(
        &self,
        raw_prompt: &str,
        target_model: &str,
        preferences: Option<UserPreferences>,
    ) -> Result<String, CompileError> {
        let request = prepare(raw_prompt, target_model, preferences)?;

        let request_id = generate_request_id();
        let span = info_span!(
            "compile",
            request_id = %request_id,
            target = %target_model,
            capability = self.capability.label(),
        );

        async move {
            debug!(
                prompt_chars = raw_prompt.chars().count(),
                payload_bytes = request.payload.len(),
                "sending rewrite request"
            );
            let start = Instant::now();

            match self
                .capability
                .rewrite(request.system_instruction, &request.payload)
                .await
            {
                Ok(text) => {
                    info!(
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        output_chars = text.chars().count(),
                        "prompt rewritten"
                    );
                    Ok(text)
                }
                Err(e) => {
                    warn!(error = %e, "rewrite failed");
                    Err(CompileError::UpstreamGeneration(e))
                }
            }
        }
        .instrument(span)
        .await
    }
}

/// Resolve the template and render the payload for one request.
///
/// Fails with [`CompileError::UnsupportedModel`] before anything is built.
pub fn prepare(
    raw_prompt: &str,
    target_model: &str,
    preferences: Option<UserPreferences>,
) -> Result<RewriteRequest, CompileError> {
    let model: TargetModel = target_model.parse()?;
    let payload = CompilationPayload::new(model, raw_prompt, preferences).render();
    Ok(RewriteRequest {
        system_instruction: system_instruction(),
        payload,
    })
}
