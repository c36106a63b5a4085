//! The structured payload sent as the user message of a rewrite request.

use serde::Serialize;

use crate::templates::TargetModel;

/// Label line that precedes the JSON body of every payload.
pub const PAYLOAD_LABEL: &str = "INPUT_PAYLOAD:";

/// Free-form caller preferences (tone, depth, verbosity, format, ...).
///
/// Insertion order is preserved so the upstream model sees keys in the order
/// the caller wrote them.
pub type UserPreferences = serde_json::Map<String, serde_json::Value>;

/// Everything the rewriting model needs for one request.
///
/// Field order is part of the wire format: `target_llm`,
/// `best_practice_prompt_structure`, `raw_user_prompt`, `user_preferences`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CompilationPayload<'a> {
    pub target_llm: &'static str,
    pub best_practice_prompt_structure: &'static str,
    pub raw_user_prompt: &'a str,
    pub user_preferences: UserPreferences,
}

impl<'a> CompilationPayload<'a> {
    /// Build a payload for an already-resolved target.
    ///
    /// `target_llm` is always the canonical lower-case identifier, whatever
    /// casing the caller used.
    pub fn new(
        model: TargetModel,
        raw_user_prompt: &'a str,
        preferences: Option<UserPreferences>,
    ) -> Self {
        Self {
            target_llm: model.as_str(),
            best_practice_prompt_structure: model.template(),
            raw_user_prompt,
            user_preferences: preferences.unwrap_or_default(),
        }
    }

    /// Render as `INPUT_PAYLOAD:` followed by two-space indented JSON.
    pub fn render(&self) -> String {
        // Serializing a struct of strings and a JSON map cannot fail.
        let body = serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string());
        format!("{PAYLOAD_LABEL}\n{body}")
    }
}
