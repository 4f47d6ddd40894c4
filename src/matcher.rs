//! Intent matcher - finds the best-scoring corpus pattern for user input

use tracing::debug;

use crate::config::{MatcherConfig, NO_RESPONSE_TAG};
use crate::corpus::IntentSet;
use crate::similarity::{score_pattern, PatternScore, PreparedInput};
use crate::types::MatchResult;

/// Match user input against every pattern of every intent
///
/// Intents are scanned in corpus order and patterns in list order. The first
/// exact match ends the scan; otherwise the first pattern reaching the
/// highest score wins.
pub fn match_best<'a>(
    set: &'a IntentSet,
    text: Option<&str>,
    config: &MatcherConfig,
) -> MatchResult<'a> {
    let input = PreparedInput::new(text);

    if input.is_empty() {
        return match_empty_input(set, config);
    }

    let mut best = MatchResult::none();

    for (intent, patterns) in set.iter_prepared() {
        for pattern in patterns {
            match score_pattern(&input, pattern, config) {
                PatternScore::Exact(score) => {
                    debug!(tag = %intent.tag, score, "Exact pattern match");
                    return MatchResult::new(intent, score, &pattern.raw);
                }
                PatternScore::Scored(score) => {
                    if score > best.score {
                        best = MatchResult::new(intent, score, &pattern.raw);
                    }
                }
            }
        }
    }

    debug!(tag = ?best.tag, score = best.score, "Best pattern match");
    best
}

/// Blank input never reaches scoring: it maps straight to the no-response intent
fn match_empty_input<'a>(set: &'a IntentSet, config: &MatcherConfig) -> MatchResult<'a> {
    let intent = set.first_with_any_tag(config.empty_input_tags.as_slice());
    MatchResult {
        tag: Some(
            intent
                .map(|i| i.tag.clone())
                .unwrap_or_else(|| NO_RESPONSE_TAG.to_string()),
        ),
        score: 1.0,
        intent,
        matched_pattern: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::load_value;
    use serde_json::json;

    fn greeting_set() -> IntentSet {
        load_value(&json!([
            {"tag": "greeting", "patterns": ["hello", "hi there"], "responses": ["Hi!", "Hello!"]}
        ]))
        .set
    }

    #[test]
    fn test_exact_match() {
        let set = greeting_set();
        let config = MatcherConfig::default();

        let m = match_best(&set, Some("Hello!!"), &config);
        assert_eq!(m.tag.as_deref(), Some("greeting"));
        assert_eq!(m.score, 1.0);
        assert_eq!(m.matched_pattern.as_deref(), Some("hello"));

        let m = match_best(&set, Some("  HI   THERE  "), &config);
        assert_eq!(m.score, 1.0);
        assert_eq!(m.matched_pattern.as_deref(), Some("hi there"));
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let set = greeting_set();
        let config = MatcherConfig::default();
        let loud = match_best(&set, Some("HELLO!!"), &config);
        let plain = match_best(&set, Some("hello"), &config);
        assert_eq!(loud.tag, plain.tag);
        assert_eq!(loud.score, plain.score);
    }

    #[test]
    fn test_no_match() {
        let set = greeting_set();
        let m = match_best(&set, Some("completely unrelated gibberish"), &MatcherConfig::default());
        assert_eq!(m, MatchResult::none());
    }

    #[test]
    fn test_first_exact_match_wins() {
        let set = load_value(&json!([
            {"tag": "A", "patterns": ["help"], "responses": ["a"]},
            {"tag": "B", "patterns": ["help me please"], "responses": ["b"]},
            {"tag": "C", "patterns": ["help"], "responses": ["c"]}
        ]))
        .set;
        let m = match_best(&set, Some("help"), &MatcherConfig::default());
        assert_eq!(m.tag.as_deref(), Some("A"));
        assert_eq!(m.score, 1.0);
    }

    #[test]
    fn test_exact_match_beats_earlier_substring() {
        let set = load_value(&json!([
            {"tag": "sad", "patterns": ["i feel sad today"], "responses": ["s"]},
            {"tag": "feel", "patterns": ["feel sad"], "responses": ["f"]}
        ]))
        .set;
        let m = match_best(&set, Some("feel sad"), &MatcherConfig::default());
        assert_eq!(m.tag.as_deref(), Some("feel"));
        assert_eq!(m.score, 1.0);
    }

    #[test]
    fn test_ties_keep_first_pattern() {
        let set = load_value(&json!([
            {"tag": "first", "patterns": ["good morning"], "responses": ["1"]},
            {"tag": "second", "patterns": ["morning good"], "responses": ["2"]}
        ]))
        .set;
        // both patterns are substrings of the input and score 0.92
        let m = match_best(&set, Some("good morning morning good"), &MatcherConfig::default());
        assert_eq!(m.tag.as_deref(), Some("first"));
        assert_eq!(m.score, 0.92);
    }

    #[test]
    fn test_substring_outscores_partial_overlap() {
        let set = load_value(&json!([
            {"tag": "overlap", "patterns": ["i am feeling very anxious"], "responses": ["o"]},
            {"tag": "contains", "patterns": ["anxious"], "responses": ["c"]}
        ]))
        .set;
        let m = match_best(&set, Some("so anxious now"), &MatcherConfig::default());
        assert_eq!(m.tag.as_deref(), Some("contains"));
        assert_eq!(m.score, 0.92);
    }

    #[test]
    fn test_empty_input_short_circuits() {
        let config = MatcherConfig::default();
        let set = load_value(&json!([
            {"tag": "greeting", "patterns": [""], "responses": ["Hi!"]},
            {"tag": "no-response", "responses": ["Say something?"]}
        ]))
        .set;

        for input in [None, Some(""), Some("  ?! ")] {
            let m = match_best(&set, input, &config);
            assert_eq!(m.tag.as_deref(), Some("no-response"));
            assert_eq!(m.score, 1.0);
            assert_eq!(m.intent.map(|i| i.tag.as_str()), Some("no-response"));
        }
    }

    #[test]
    fn test_empty_input_takes_first_matching_intent_in_corpus_order() {
        let set = load_value(&json!([
            {"tag": "fallback", "responses": ["Hmm?"]},
            {"tag": "no-response", "responses": ["Say something?"]}
        ]))
        .set;
        let m = match_best(&set, Some(""), &MatcherConfig::default());
        assert_eq!(m.tag.as_deref(), Some("fallback"));
        assert_eq!(m.score, 1.0);
    }

    #[test]
    fn test_empty_input_without_corpus() {
        let set = IntentSet::empty();
        let m = match_best(&set, None, &MatcherConfig::default());
        assert_eq!(m.tag.as_deref(), Some("no-response"));
        assert_eq!(m.score, 1.0);
        assert!(m.intent.is_none());
    }

    #[test]
    fn test_scores_stay_in_unit_range() {
        let set = load_value(&json!([
            {"tag": "a", "patterns": ["x", "x x x", "", "lorem ipsum dolor sit"], "responses": ["a"]},
            {"tag": "b", "patterns": ["ipsum lorem"], "responses": ["b"]}
        ]))
        .set;
        let config = MatcherConfig::default();
        for input in ["x", "y", "lorem", "dolor sit amet", "x x", "!!!", "ipsum lorem dolor"] {
            let score = match_best(&set, Some(input), &config).score;
            assert!((0.0..=1.0).contains(&score), "{input}: {score}");
        }
    }

    #[test]
    fn test_tuned_constants_apply() {
        let set = greeting_set();
        let config = MatcherConfig {
            substring_score: 0.5,
            ..MatcherConfig::default()
        };
        let m = match_best(&set, Some("hello friend"), &config);
        assert_eq!(m.score, 0.5);
    }
}
