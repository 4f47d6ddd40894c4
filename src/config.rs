//! Tunable scoring and fallback configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Score for a pattern equal to the normalized input
pub const EXACT_SCORE: f64 = 1.0;
/// Flat score when one normalized string contains the other
pub const SUBSTRING_SCORE: f64 = 0.92;
/// Damping applied to token overlap against short patterns
pub const SHORT_PATTERN_WEIGHT: f64 = 0.95;
/// Patterns with fewer tokens than this count as short
pub const SHORT_PATTERN_TOKENS: usize = 3;
/// Minimum score to accept a match instead of a fallback
pub const FALLBACK_THRESHOLD: f64 = 0.25;

pub const NO_RESPONSE_TAG: &str = "no-response";
pub const FALLBACK_TAG: &str = "fallback";
pub const APOLOGY: &str = "Sorry, I didn't understand that.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    pub exact_score: f64,
    pub substring_score: f64,
    pub short_pattern_weight: f64,
    pub short_pattern_tokens: usize,
    pub fallback_threshold: f64,
    /// Tags answered for blank input, first present wins
    pub empty_input_tags: Vec<String>,
    /// Tags tried in order when a match is rejected
    pub fallback_tags: Vec<String>,
    /// Tag reported when no fallback intent exists in the corpus
    pub fallback_tag: String,
    pub apology: String,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            exact_score: EXACT_SCORE,
            substring_score: SUBSTRING_SCORE,
            short_pattern_weight: SHORT_PATTERN_WEIGHT,
            short_pattern_tokens: SHORT_PATTERN_TOKENS,
            fallback_threshold: FALLBACK_THRESHOLD,
            empty_input_tags: vec![NO_RESPONSE_TAG.to_string(), FALLBACK_TAG.to_string()],
            fallback_tags: vec![NO_RESPONSE_TAG.to_string(), "default".to_string()],
            fallback_tag: FALLBACK_TAG.to_string(),
            apology: APOLOGY.to_string(),
        }
    }
}

impl MatcherConfig {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit_fields = [
            ("exact_score", self.exact_score),
            ("substring_score", self.substring_score),
            ("short_pattern_weight", self.short_pattern_weight),
            ("fallback_threshold", self.fallback_threshold),
        ];
        for (field, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }

        if self.fallback_tag.is_empty() {
            return Err(ConfigError::Empty("fallback_tag"));
        }
        if self.apology.is_empty() {
            return Err(ConfigError::Empty("apology"));
        }
        Ok(())
    }
}
