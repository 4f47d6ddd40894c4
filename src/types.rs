//! Core data types for classification results

use serde::{Deserialize, Serialize};

/// A named category of user meaning with example patterns and canned replies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub tag: String,
    #[serde(default)]
    pub patterns: Vec<String>,
    pub responses: Vec<String>,
}

/// Outcome of scanning the corpus for one input
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    pub tag: Option<String>,
    pub score: f64,
    pub intent: Option<&'a Intent>,
    pub matched_pattern: Option<String>,
}

/// Owned view of a match, safe to hand across the engine boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestIntent {
    pub tag: Option<String>,
    pub score: f64,
    pub intent: Option<Intent>,
}

/// The reply handed back to the chat host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseResult {
    pub tag: String,
    pub score: f64,
    pub response: String,
}

impl<'a> MatchResult<'a> {
    /// A scan that found nothing scoring above zero
    pub fn none() -> Self {
        Self {
            tag: None,
            score: 0.0,
            intent: None,
            matched_pattern: None,
        }
    }

    pub fn new(intent: &'a Intent, score: f64, pattern: &str) -> Self {
        Self {
            tag: Some(intent.tag.clone()),
            score,
            intent: Some(intent),
            matched_pattern: Some(pattern.to_string()),
        }
    }

    pub fn to_owned_best(&self) -> BestIntent {
        BestIntent {
            tag: self.tag.clone(),
            score: self.score,
            intent: self.intent.cloned(),
        }
    }
}
