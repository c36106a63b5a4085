//! Request correlation IDs and cost estimation for upstream calls.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

/// Generate a unique ID for one compile request.
pub fn generate_request_id() -> String {
    let ts = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    // Counter disambiguates calls within the same nanosecond.
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("rq-{ts:x}-{count:04x}")
}

/// Per-model pricing (USD per 1M tokens).
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPricing {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

impl ModelPricing {
    pub fn estimate_cost(&self, prompt_tokens: u32, completion_tokens: u32) -> f64 {
        (prompt_tokens as f64 / 1_000_000.0) * self.input_per_million
            + (completion_tokens as f64 / 1_000_000.0) * self.output_per_million
    }
}

impl Default for ModelPricing {
    fn default() -> Self {
        Self {
            input_per_million: 3.0,
            output_per_million: 15.0,
        }
    }
}

/// Approximate pricing for the model doing the rewrite.
///
/// Matches on the segment after the last `/`, so `openai/gpt-4o-mini` and
/// `gpt-4o-mini` price the same. Figures are rough; they only feed debug logs.
pub fn pricing_for_model(model: &str) -> ModelPricing {
    let name = model.rsplit('/').next().unwrap_or(model).to_lowercase();

    let (input, output) = if name.contains("4o-mini") {
        (0.15, 0.60)
    } else if name.contains("gpt-4o") || name.contains("gpt-4") {
        (2.50, 10.0)
    } else if name.contains("opus") {
        (15.0, 75.0)
    } else if name.contains("sonnet") {
        (3.0, 15.0)
    } else if name.contains("haiku") {
        (0.25, 1.25)
    } else if name.contains("gemini") && name.contains("flash") {
        (0.075, 0.30)
    } else if name.contains("gemini") {
        (1.25, 5.0)
    } else {
        return ModelPricing::default();
    };
    ModelPricing {
        input_per_million: input,
        output_per_million: output,
    }
}
