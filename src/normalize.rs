//! Text normalization shared by inputs and corpus patterns

use regex::Regex;
use std::sync::LazyLock;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").expect("Invalid regex: non-word characters"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex: whitespace run"));

/// Canonicalize text for comparison
///
/// Lowercases, turns anything outside `[a-z0-9]` and whitespace into a space,
/// collapses whitespace runs and trims. Absent input normalizes to `""`.
pub fn normalize<'a>(text: impl Into<Option<&'a str>>) -> String {
    let Some(text) = text.into() else {
        return String::new();
    };

    let lower = text.to_lowercase();
    let stripped = NON_WORD.replace_all(&lower, " ");
    WHITESPACE_RUN.replace_all(&stripped, " ").trim().to_string()
}

/// Normalize then split into words
pub fn tokenize<'a>(text: impl Into<Option<&'a str>>) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
