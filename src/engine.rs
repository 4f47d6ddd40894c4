//! Intent engine - the process-wide entry point a chat host talks to
//!
//! Holds the current intent set behind a swappable `Arc`. Queries take a
//! snapshot and run lock-free against it; a reload builds the replacement
//! set first and publishes it in one store, so a query never sees a
//! half-built corpus.

use rand::Rng;
use std::path::Path;
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

use crate::config::MatcherConfig;
use crate::corpus::{self, IntentSet, LoadReport};
use crate::error::CorpusError;
use crate::fallback::resolve;
use crate::matcher::match_best;
use crate::selector::pick_response;
use crate::types::{BestIntent, ResponseResult};

/// Per-call knobs for [`IntentEngine::response`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResponseOptions {
    /// Minimum accepted score; the configured threshold when `None`
    pub fallback_threshold: Option<f64>,
}

impl ResponseOptions {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            fallback_threshold: Some(threshold),
        }
    }
}

#[derive(Debug)]
pub struct IntentEngine {
    current: RwLock<Arc<IntentSet>>,
    config: MatcherConfig,
}

impl IntentEngine {
    pub fn new(set: IntentSet, config: MatcherConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(set)),
            config,
        }
    }

    /// Start from a corpus file; a broken file leaves the engine serving fallbacks
    pub fn from_path(path: impl AsRef<Path>, config: MatcherConfig) -> Self {
        let report = corpus::load_path(path);
        Self::new(report.set, config)
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// The intent set queries currently run against
    pub fn snapshot(&self) -> Arc<IntentSet> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Publish a freshly built intent set
    pub fn replace(&self, set: IntentSet) {
        let set = Arc::new(set);
        info!(intents = set.len(), "Publishing intent set");
        match self.current.write() {
            Ok(mut guard) => *guard = set,
            Err(poisoned) => *poisoned.into_inner() = set,
        }
    }

    /// Swap in the set from a load report, even an empty one
    pub fn reload(&self, report: LoadReport) {
        if let Some(error) = &report.error {
            warn!(error = %error, "Reloading with an empty intent set");
        }
        self.replace(report.set);
    }

    /// Reload from disk, keeping the current set if the file is unusable
    pub fn reload_from_path(&self, path: impl AsRef<Path>) -> Result<usize, CorpusError> {
        let report = corpus::try_load_path(path)?;
        let count = report.set.len();
        self.replace(report.set);
        Ok(count)
    }

    /// Best-scoring intent for the input, before any fallback
    pub fn best_intent<'t>(&self, text: impl Into<Option<&'t str>>) -> BestIntent {
        let set = self.snapshot();
        match_best(&set, text.into(), &self.config).to_owned_best()
    }

    /// Reply for the input, sampled with the thread-local RNG
    pub fn response<'t>(
        &self,
        text: impl Into<Option<&'t str>>,
        options: ResponseOptions,
    ) -> ResponseResult {
        self.response_with_rng(text, options, &mut rand::thread_rng())
    }

    /// Reply for the input, sampled with a caller-provided random source
    pub fn response_with_rng<'t, R: Rng + ?Sized>(
        &self,
        text: impl Into<Option<&'t str>>,
        options: ResponseOptions,
        rng: &mut R,
    ) -> ResponseResult {
        let set = self.snapshot();
        let threshold = options
            .fallback_threshold
            .unwrap_or(self.config.fallback_threshold);

        let matched = match_best(&set, text.into(), &self.config);
        let resolution = resolve(&matched, &set, threshold, &self.config);
        let response = pick_response(resolution.responses(), &self.config.apology, rng);

        debug!(
            tag = resolution.tag(),
            score = matched.score,
            fallback = resolution.is_fallback(),
            "Selected response"
        );

        ResponseResult {
            tag: resolution.tag().to_string(),
            score: matched.score,
            response,
        }
    }
}

impl Default for IntentEngine {
    fn default() -> Self {
        Self::new(IntentSet::empty(), MatcherConfig::default())
    }
}
