//! Pattern scoring
//!
//! Three tiers, checked in order:
//! 1. Normalized equality → exact score (ends the scan)
//! 2. One string contains the other → flat substring score
//! 3. Token overlap (intersection / union), damped for short patterns

use ahash::AHashSet;

use crate::config::MatcherConfig;
use crate::corpus::PreparedPattern;
use crate::normalize::normalize;

/// How a single pattern scored against the input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PatternScore {
    Exact(f64),
    Scored(f64),
}

impl PatternScore {
    pub fn value(self) -> f64 {
        match self {
            PatternScore::Exact(score) | PatternScore::Scored(score) => score,
        }
    }
}

/// Normalized input plus its token set, computed once per call
#[derive(Debug, Clone)]
pub struct PreparedInput {
    pub normalized: String,
    pub tokens: AHashSet<String>,
}

impl PreparedInput {
    pub fn new<'a>(text: impl Into<Option<&'a str>>) -> Self {
        let normalized = normalize(text);
        let tokens = normalized.split_whitespace().map(str::to_string).collect();
        Self { normalized, tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// Shared words over distinct words; 0.0 if either side is empty
pub fn token_overlap(a: &AHashSet<String>, b: &AHashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let shared = a.intersection(b).count();
    let union = a.len() + b.len() - shared;
    shared as f64 / union as f64
}

/// Score one prepared pattern against prepared input
pub fn score_pattern(
    input: &PreparedInput,
    pattern: &PreparedPattern,
    config: &MatcherConfig,
) -> PatternScore {
    let pattern_text = pattern.normalized.as_str();

    if !pattern_text.is_empty() {
        if pattern_text == input.normalized {
            return PatternScore::Exact(config.exact_score);
        }
        if input.normalized.contains(pattern_text) || pattern_text.contains(input.normalized.as_str())
        {
            return PatternScore::Scored(config.substring_score);
        }
    }

    let overlap = token_overlap(&input.tokens, &pattern.tokens);
    let weight = if pattern.token_count < config.short_pattern_tokens {
        config.short_pattern_weight
    } else {
        1.0
    };
    PatternScore::Scored(overlap * weight)
}

/// Convenience scorer for two raw strings
pub fn calculate_similarity(input: &str, pattern: &str, config: &MatcherConfig) -> f64 {
    let input = PreparedInput::new(input);
    if input.is_empty() {
        return 0.0;
    }
    score_pattern(&input, &PreparedPattern::new(pattern), config).value()
}
