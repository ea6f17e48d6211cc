//! Approximate cost estimation for upstream completions.
//!
//! Rates are USD per million tokens, keyed by the upstream model identifier
//! (not the caller-facing name). Figures are advisory.

use super::types::{UpstreamUsage, Usage};

/// Decimal places kept in an estimated cost.
pub const COST_PRECISION: i32 = 6;

/// Input/output price pair in USD per million tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rates {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

impl Rates {
    const fn new(input_per_million: f64, output_per_million: f64) -> Self {
        Self {
            input_per_million,
            output_per_million,
        }
    }
}

/// Rates applied to upstream models missing from [`RATE_TABLE`].
pub const DEFAULT_RATES: Rates = Rates::new(1.0, 2.0);

/// Known upstream model rates.
pub const RATE_TABLE: &[(&str, Rates)] = &[
    ("openai/o3-mini", Rates::new(1.1, 4.4)),
    ("openai/gpt-4o", Rates::new(2.5, 10.0)),
    ("openai/gpt-4o-mini", Rates::new(0.15, 0.6)),
    ("anthropic/claude-3.7-sonnet", Rates::new(3.0, 15.0)),
    ("google/gemini-2.0-flash-001", Rates::new(0.1, 0.4)),
    ("deepseek/deepseek-r1", Rates::new(0.55, 2.19)),
];

/// Look up the rates for an upstream model, falling back to [`DEFAULT_RATES`].
pub fn rates_for(model_id: &str) -> Rates {
    RATE_TABLE
        .iter()
        .find(|(id, _)| *id == model_id)
        .map(|(_, rates)| *rates)
        .unwrap_or(DEFAULT_RATES)
}

/// Estimate the cost of a completion, rounded to [`COST_PRECISION`] places.
pub fn estimate_cost(model_id: &str, prompt_tokens: u64, completion_tokens: u64) -> f64 {
    let rates = rates_for(model_id);
    let raw = (prompt_tokens as f64 * rates.input_per_million
        + completion_tokens as f64 * rates.output_per_million)
        / 1_000_000.0;
    round_to(raw, COST_PRECISION)
}

/// Convert upstream usage into caller-facing usage with a cost estimate.
pub fn usage_with_cost(model_id: &str, usage: UpstreamUsage) -> Usage {
    Usage {
        prompt_tokens: usage.prompt_tokens,
        completion_tokens: usage.completion_tokens,
        total_tokens: usage.total_tokens,
        estimated_cost: Some(estimate_cost(
            model_id,
            usage.prompt_tokens,
            usage.completion_tokens,
        )),
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
