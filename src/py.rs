//! Python bindings for the intent engine using PyO3

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::config::MatcherConfig;
use crate::corpus::{load_str, try_load_str, IntentSet};
use crate::engine::{IntentEngine, ResponseOptions};
use crate::normalize::{normalize, tokenize};
use crate::telemetry::init_tracing;

/// Anything that is not a Python `str` is treated as empty input
fn coerce_text(text: Option<&Bound<'_, PyAny>>) -> Option<String> {
    text.and_then(|value| value.extract::<String>().ok())
}

/// Normalize text the same way the matcher does (Python function)
#[pyfunction]
#[pyo3(name = "normalize", signature = (text=None))]
pub fn py_normalize(text: Option<&Bound<'_, PyAny>>) -> String {
    normalize(coerce_text(text).as_deref())
}

/// Split normalized text into words (Python function)
#[pyfunction]
#[pyo3(name = "tokenize", signature = (text=None))]
pub fn py_tokenize(text: Option<&Bound<'_, PyAny>>) -> Vec<String> {
    tokenize(coerce_text(text).as_deref())
}

/// Install a stderr log subscriber (Python function)
#[pyfunction]
#[pyo3(name = "init_logging", signature = (filter=None))]
pub fn py_init_logging(filter: Option<&str>) -> bool {
    init_tracing(filter)
}

/// Python wrapper for the intent engine
#[pyclass(name = "IntentEngine")]
pub struct PyIntentEngine {
    engine: IntentEngine,
}

#[pymethods]
impl PyIntentEngine {
    /// Build from a corpus file path or a JSON string; neither gives an empty corpus
    #[new]
    #[pyo3(signature = (path=None, json=None, config_json=None))]
    fn new(path: Option<&str>, json: Option<&str>, config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(raw) => MatcherConfig::from_json_str(raw)
                .map_err(|e| PyValueError::new_err(format!("Invalid matcher config: {}", e)))?,
            None => MatcherConfig::default(),
        };

        let engine = match (path, json) {
            (Some(path), _) => IntentEngine::from_path(path, config),
            (None, Some(raw)) => IntentEngine::new(load_str(raw).set, config),
            (None, None) => IntentEngine::new(IntentSet::empty(), config),
        };
        Ok(Self { engine })
    }

    /// Best-scoring intent before fallback: {tag, score, intent}
    #[pyo3(signature = (text=None))]
    fn best_intent<'py>(
        &self,
        py: Python<'py>,
        text: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let best = self.engine.best_intent(coerce_text(text).as_deref());

        let dict = PyDict::new_bound(py);
        dict.set_item("tag", best.tag)?;
        dict.set_item("score", best.score)?;
        match best.intent {
            Some(intent) => {
                let intent_dict = PyDict::new_bound(py);
                intent_dict.set_item("tag", intent.tag)?;
                intent_dict.set_item("patterns", intent.patterns)?;
                intent_dict.set_item("responses", intent.responses)?;
                dict.set_item("intent", intent_dict)?;
            }
            None => dict.set_item("intent", py.None())?,
        }
        Ok(dict)
    }

    /// Reply for a user message: {tag, score, response}
    #[pyo3(signature = (text=None, fallback_threshold=None))]
    fn get_response<'py>(
        &self,
        py: Python<'py>,
        text: Option<&Bound<'py, PyAny>>,
        fallback_threshold: Option<f64>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let result = self.engine.response(
            coerce_text(text).as_deref(),
            ResponseOptions { fallback_threshold },
        );

        let dict = PyDict::new_bound(py);
        dict.set_item("tag", result.tag)?;
        dict.set_item("score", result.score)?;
        dict.set_item("response", result.response)?;
        Ok(dict)
    }

    /// Reload from a file; raises and keeps the current corpus on failure
    fn reload_path(&self, path: &str) -> PyResult<usize> {
        self.engine
            .reload_from_path(path)
            .map_err(|e| PyValueError::new_err(format!("Failed to reload corpus: {}", e)))
    }

    /// Reload from a JSON string; raises and keeps the current corpus on failure
    fn reload_json(&self, json: &str) -> PyResult<usize> {
        let report = try_load_str(json)
            .map_err(|e| PyValueError::new_err(format!("Failed to reload corpus: {}", e)))?;
        let count = report.set.len();
        self.engine.reload(report);
        Ok(count)
    }

    /// Get number of loaded intents
    fn len(&self) -> usize {
        self.engine.snapshot().len()
    }

    fn __len__(&self) -> usize {
        self.len()
    }
}
