//! Fallback resolution - decides whether a match is trusted enough to answer

use tracing::debug;

use crate::config::MatcherConfig;
use crate::corpus::IntentSet;
use crate::types::{Intent, MatchResult};

/// The intent whose responses will be sampled
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    /// The match cleared the threshold
    Matched(&'a Intent),
    /// A corpus fallback intent replaced a weak or missing match
    Fallback(&'a Intent),
    /// No fallback intent exists; answer with a fixed apology
    Synthesized { tag: String, responses: Vec<String> },
}

impl Resolution<'_> {
    pub fn tag(&self) -> &str {
        match self {
            Resolution::Matched(intent) | Resolution::Fallback(intent) => &intent.tag,
            Resolution::Synthesized { tag, .. } => tag,
        }
    }

    pub fn responses(&self) -> &[String] {
        match self {
            Resolution::Matched(intent) | Resolution::Fallback(intent) => &intent.responses,
            Resolution::Synthesized { responses, .. } => responses,
        }
    }

    pub fn is_fallback(&self) -> bool {
        !matches!(self, Resolution::Matched(_))
    }
}

/// Honor the match, or substitute the first configured fallback intent
pub fn resolve<'a>(
    matched: &MatchResult<'a>,
    set: &'a IntentSet,
    threshold: f64,
    config: &MatcherConfig,
) -> Resolution<'a> {
    match matched.intent {
        Some(intent) if matched.score >= threshold => Resolution::Matched(intent),
        _ => {
            debug!(
                score = matched.score,
                threshold,
                tag = ?matched.tag,
                "Match rejected, resolving fallback"
            );
            match set.first_tagged(config.fallback_tags.as_slice()) {
                Some(intent) => Resolution::Fallback(intent),
                None => Resolution::Synthesized {
                    tag: config.fallback_tag.clone(),
                    responses: vec![config.apology.clone()],
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::load_value;
    use crate::matcher::match_best;
    use serde_json::json;

    fn corpus_with_fallbacks() -> IntentSet {
        load_value(&json!([
            {"tag": "greeting", "patterns": ["hello there"], "responses": ["Hi!"]},
            {"tag": "default", "responses": ["Tell me more."]},
            {"tag": "no-response", "responses": ["Are you still there?"]}
        ]))
        .set
    }

    #[test]
    fn test_passes_strong_match_through() {
        let set = corpus_with_fallbacks();
        let config = MatcherConfig::default();
        let m = match_best(&set, Some("hello there"), &config);

        let resolution = resolve(&m, &set, 0.25, &config);
        assert_eq!(resolution.tag(), "greeting");
        assert!(!resolution.is_fallback());
    }

    #[test]
    fn test_weak_match_uses_priority_fallback() {
        let set = corpus_with_fallbacks();
        let config = MatcherConfig::default();
        // "hello" vs "hello there" is a substring hit at 0.92
        let m = match_best(&set, Some("hello"), &config);
        assert_eq!(m.tag.as_deref(), Some("greeting"));

        let resolution = resolve(&m, &set, 0.95, &config);
        assert_eq!(resolution, Resolution::Fallback(set.find_tag("no-response").unwrap()));
    }

    #[test]
    fn test_score_equal_to_threshold_is_accepted() {
        let set = corpus_with_fallbacks();
        let config = MatcherConfig::default();
        let m = match_best(&set, Some("hello"), &config);
        assert_eq!(resolve(&m, &set, 0.92, &config).tag(), "greeting");
    }

    #[test]
    fn test_default_tag_when_no_response_missing() {
        let set = load_value(&json!([
            {"tag": "default", "responses": ["Tell me more."]}
        ]))
        .set;
        let config = MatcherConfig::default();
        let m = match_best(&set, Some("anything"), &config);
        assert_eq!(resolve(&m, &set, 0.25, &config).tag(), "default");
    }

    #[test]
    fn test_synthesizes_apology_without_fallback_intents() {
        let set = IntentSet::empty();
        let config = MatcherConfig::default();
        let m = match_best(&set, Some("anything"), &config);

        let resolution = resolve(&m, &set, 0.25, &config);
        assert_eq!(resolution.tag(), "fallback");
        assert_eq!(resolution.responses(), ["Sorry, I didn't understand that.".to_string()]);
    }

    #[test]
    fn test_empty_input_without_intent_falls_back() {
        // the blank-input short circuit scores 1 but carries no intent
        let set = load_value(&json!([
            {"tag": "default", "responses": ["Tell me more."]}
        ]))
        .set;
        let config = MatcherConfig::default();
        let m = match_best(&set, None, &config);
        assert_eq!(m.score, 1.0);
        assert_eq!(resolve(&m, &set, 0.25, &config).tag(), "default");
    }
}
