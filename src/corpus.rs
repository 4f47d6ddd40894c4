//! Corpus loading - turns intent JSON into an immutable intent set

use ahash::AHashSet;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::error::CorpusError;
use crate::normalize::normalize;
use crate::types::Intent;

/// A corpus pattern with its comparison forms computed once
#[derive(Debug, Clone)]
pub struct PreparedPattern {
    pub raw: String,
    pub normalized: String,
    /// Token count including repeats
    pub token_count: usize,
    pub tokens: AHashSet<String>,
}

impl PreparedPattern {
    pub fn new(raw: &str) -> Self {
        let normalized = normalize(raw);
        let words: Vec<&str> = normalized.split_whitespace().collect();
        let token_count = words.len();
        let tokens = words.into_iter().map(str::to_string).collect();
        Self {
            raw: raw.to_string(),
            normalized,
            token_count,
            tokens,
        }
    }
}

/// Ordered, read-only list of intents
#[derive(Debug, Clone, Default)]
pub struct IntentSet {
    intents: Vec<Intent>,
    prepared: Vec<Vec<PreparedPattern>>,
}

impl IntentSet {
    /// Build a set, dropping intents with a blank tag or no responses
    pub fn new(intents: Vec<Intent>) -> Self {
        Self::build(intents).0
    }

    /// Like [`IntentSet::new`], also returning how many intents were dropped
    pub fn build(intents: Vec<Intent>) -> (Self, usize) {
        let total = intents.len();
        let intents: Vec<Intent> = intents.into_iter().filter(is_usable).collect();
        let dropped = total - intents.len();
        if dropped > 0 {
            warn!(dropped, "Dropping intents with a blank tag or no responses");
        }

        let prepared = intents
            .iter()
            .map(|intent| intent.patterns.iter().map(|p| PreparedPattern::new(p)).collect())
            .collect();
        (Self { intents, prepared }, dropped)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    /// Intents in corpus order, each with its prepared patterns
    pub fn iter_prepared(&self) -> impl Iterator<Item = (&Intent, &[PreparedPattern])> {
        self.intents
            .iter()
            .zip(self.prepared.iter().map(Vec::as_slice))
    }

    pub fn find_tag(&self, tag: &str) -> Option<&Intent> {
        self.intents.iter().find(|intent| intent.tag == tag)
    }

    /// First tag in `tags` (priority order) that names an intent
    pub fn first_tagged<S: AsRef<str>>(&self, tags: &[S]) -> Option<&Intent> {
        tags.iter().find_map(|tag| self.find_tag(tag.as_ref()))
    }

    /// First intent in corpus order whose tag is any of `tags`
    pub fn first_with_any_tag<S: AsRef<str>>(&self, tags: &[S]) -> Option<&Intent> {
        self.intents
            .iter()
            .find(|intent| tags.iter().any(|tag| tag.as_ref() == intent.tag))
    }
}

/// Result of a tolerant load
#[derive(Debug)]
pub struct LoadReport {
    pub set: IntentSet,
    /// Records dropped for failing validation
    pub discarded: usize,
    /// Why the set is empty, when the source itself was unusable
    pub error: Option<CorpusError>,
}

impl LoadReport {
    fn failed(error: CorpusError) -> Self {
        warn!(error = %error, "Corpus unusable, continuing with an empty intent set");
        Self {
            set: IntentSet::empty(),
            discarded: 0,
            error: Some(error),
        }
    }
}

/// Build an intent set from an already parsed JSON document
///
/// Accepts `{"intents": [...]}` or a bare array of records.
pub fn try_load_value(document: &Value) -> Result<LoadReport, CorpusError> {
    let records = match document {
        Value::Array(records) => records,
        Value::Object(map) => match map.get("intents") {
            Some(Value::Array(records)) => records,
            Some(_) => return Err(CorpusError::Shape("\"intents\" is not an array".to_string())),
            None => return Err(CorpusError::Shape("missing \"intents\" key".to_string())),
        },
        _ => {
            return Err(CorpusError::Shape(
                "expected an object or an array of intents".to_string(),
            ))
        }
    };

    let mut intents = Vec::with_capacity(records.len());
    let mut discarded = 0;
    for (index, record) in records.iter().enumerate() {
        match parse_record(record) {
            Some(intent) => intents.push(intent),
            None => {
                discarded += 1;
                warn!(index, "Discarding malformed intent record");
            }
        }
    }

    info!(intents = intents.len(), discarded, "Loaded intent corpus");
    Ok(LoadReport {
        set: IntentSet::new(intents),
        discarded,
        error: None,
    })
}

pub fn try_load_str(raw: &str) -> Result<LoadReport, CorpusError> {
    let document: Value = serde_json::from_str(raw)?;
    try_load_value(&document)
}

pub fn try_load_reader<R: Read>(reader: R) -> Result<LoadReport, CorpusError> {
    let document: Value = serde_json::from_reader(reader)?;
    try_load_value(&document)
}

pub fn try_load_path(path: impl AsRef<Path>) -> Result<LoadReport, CorpusError> {
    let raw = fs::read_to_string(path.as_ref())?;
    try_load_str(&raw)
}

pub fn load_value(document: &Value) -> LoadReport {
    try_load_value(document).unwrap_or_else(LoadReport::failed)
}

pub fn load_str(raw: &str) -> LoadReport {
    try_load_str(raw).unwrap_or_else(LoadReport::failed)
}

pub fn load_reader<R: Read>(reader: R) -> LoadReport {
    try_load_reader(reader).unwrap_or_else(LoadReport::failed)
}

/// Load a corpus file, degrading to an empty set if it is missing or broken
pub fn load_path(path: impl AsRef<Path>) -> LoadReport {
    let path = path.as_ref();
    try_load_path(path).unwrap_or_else(|error| {
        warn!(path = %path.display(), "Failed to load intent corpus");
        LoadReport::failed(error)
    })
}

fn is_usable(intent: &Intent) -> bool {
    !intent.tag.trim().is_empty() && !intent.responses.is_empty()
}

fn parse_record(record: &Value) -> Option<Intent> {
    let fields = record.as_object()?;

    let tag = fields.get("tag").and_then(Value::as_str)?;

    let intent = Intent {
        tag: tag.to_string(),
        patterns: string_list(fields.get("patterns")),
        responses: string_list(fields.get("responses")),
    };
    is_usable(&intent).then_some(intent)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
