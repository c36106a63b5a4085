//! Best-practice prompt templates, one per supported target model.
//!
//! Each template is a structural skeleton of the sections that model's
//! documentation recommends. Templates are static data: they are selected by
//! [`TargetModel`] and never modified at runtime.

use std::fmt;
use std::str::FromStr;

use crate::error::CompileError;

/// Template for the GPT family.
pub static GPT_TEMPLATE: &str = "\
ROLE:
You are an expert [domain] with strong teaching ability.

CONTEXT:
Brief background or situation (what I know, what I'm working on, constraints).

TASK:
Exactly what you want done. Use clear action verbs (build, create, write, analyze, etc.).

FORMAT:
How the answer should be structured (code, working app, steps, table, short, etc.).

CONSTRAINTS:
Rules to follow (no extra explanation, no comments, exam-style, etc.).

EXAMPLES (optional):
Show 1 example of desired output.

DEPTH LEVEL:
Beginner / Intermediate / Advanced / Exam-ready / Industry-level.";

/// Template for Claude.
pub static CLAUDE_TEMPLATE: &str = "\
ROLE:
You are a careful, highly knowledgeable expert in [domain].

CONTEXT:
Here is the background you should consider before answering:
[clear situation, what I know, what I’m working on]

OBJECTIVE:
Your goal is to [exact outcome].

DELIVERABLE:
Provide [explanation / steps / code / analysis].

STYLE:
Be clear, precise, and logically structured.

CONSTRAINTS:
- Avoid unnecessary verbosity
- Do not assume missing information
- Follow only what is asked

DEPTH:
Beginner / Intermediate / Advanced / Academic / Industry-level";

/// Template for Gemini.
pub static GEMINI_TEMPLATE: &str = "\
TASK:
[Clear, direct task statement]

BACKGROUND:
Relevant context you should consider:
[what I know / what I’m doing]

SCOPE:
Include:
- [thing 1]
- [thing 2]

Exclude:
- [thing you don’t want]

OUTPUT FORMAT:
[table / bullets / steps / summary]

EVALUATION CRITERIA:
- Accuracy
- Clarity
- Conciseness

DEPTH:
Overview / Detailed / Exam-ready / Research-level";

/// A model family we know how to write prompts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetModel {
    Gpt,
    Claude,
    Gemini,
}

impl TargetModel {
    /// Every supported target, in display order.
    pub const ALL: [TargetModel; 3] = [TargetModel::Gpt, TargetModel::Claude, TargetModel::Gemini];

    /// Canonical lower-case identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            TargetModel::Gpt => "gpt",
            TargetModel::Claude => "claude",
            TargetModel::Gemini => "gemini",
        }
    }

    /// The best-practice template for this target.
    pub fn template(self) -> &'static str {
        match self {
            TargetModel::Gpt => GPT_TEMPLATE,
            TargetModel::Claude => CLAUDE_TEMPLATE,
            TargetModel::Gemini => GEMINI_TEMPLATE,
        }
    }
}

impl fmt::Display for TargetModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetModel {
    type Err = CompileError;

    /// Case-insensitive parse. Surrounding whitespace is ignored; the error
    /// carries the identifier exactly as given.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gpt" => Ok(TargetModel::Gpt),
            "claude" => Ok(TargetModel::Claude),
            "gemini" => Ok(TargetModel::Gemini),
            _ => Err(CompileError::UnsupportedModel {
                identifier: s.to_string(),
            }),
        }
    }
}

/// Look up the template for a model identifier.
///
/// Fails with [`CompileError::UnsupportedModel`] for anything outside
/// `gpt`, `claude` and `gemini`. There is no fallback template.
pub fn resolve(identifier: &str) -> Result<&'static str, CompileError> {
    identifier.parse::<TargetModel>().map(TargetModel::template)
}

/// Comma-separated list of supported identifiers, for help and error text.
pub fn supported_identifiers() -> String {
    TargetModel::ALL
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn casing_variants_resolve_to_same_template() {
        for model in TargetModel::ALL {
            let lower = model.as_str();
            let upper = lower.to_uppercase();
            let mut chars = lower.chars();
            let title: String = chars
                .next()
                .into_iter()
                .flat_map(char::to_uppercase)
                .chain(chars)
                .collect();

            let expected = resolve(lower).unwrap();
            assert!(std::ptr::eq(resolve(&upper).unwrap(), expected));
            assert!(std::ptr::eq(resolve(&title).unwrap(), expected));
        }
    }

    #[test]
    fn each_target_has_its_own_template() {
        assert_eq!(resolve("gpt").unwrap(), GPT_TEMPLATE);
        assert_eq!(resolve("claude").unwrap(), CLAUDE_TEMPLATE);
        assert_eq!(resolve("gemini").unwrap(), GEMINI_TEMPLATE);
        assert_ne!(GPT_TEMPLATE, CLAUDE_TEMPLATE);
        assert_ne!(CLAUDE_TEMPLATE, GEMINI_TEMPLATE);
    }

    #[test]
    fn unsupported_identifier_is_rejected() {
        for bad in ["llama", "", "gpt4", "claude-3", "mistral"] {
            match resolve(bad) {
                Err(CompileError::UnsupportedModel { identifier }) => assert_eq!(identifier, bad),
                other => panic!("expected UnsupportedModel for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(" Gemini\n".parse::<TargetModel>().unwrap(), TargetModel::Gemini);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for model in TargetModel::ALL {
            assert_eq!(model.to_string().parse::<TargetModel>().unwrap(), model);
        }
    }

    #[test]
    fn templates_carry_depth_sections() {
        assert!(GPT_TEMPLATE.starts_with("ROLE:"));
        assert!(GPT_TEMPLATE.contains("DEPTH LEVEL:"));
        assert!(CLAUDE_TEMPLATE.contains("DELIVERABLE:"));
        assert!(GEMINI_TEMPLATE.starts_with("TASK:"));
        assert!(GEMINI_TEMPLATE.contains("EVALUATION CRITERIA:"));
    }

    #[test]
    fn supported_list() {
        assert_eq!(supported_identifiers(), "gpt, claude, gemini");
    }
}
