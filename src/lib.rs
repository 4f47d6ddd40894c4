//! Intent core - rule-based intent classification for a chat companion
//!
//! Matches free-text user messages against a static corpus of intents and
//! returns one of the winning intent's canned responses, falling back to a
//! designated intent (or a fixed apology) when nothing matches well enough.

pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod matcher;
pub mod normalize;
pub mod selector;
pub mod similarity;
pub mod telemetry;
pub mod types;

pub use config::MatcherConfig;
pub use corpus::{load_path, load_str, load_value, IntentSet, LoadReport};
pub use engine::{IntentEngine, ResponseOptions};
pub use error::{ConfigError, CorpusError};
pub use fallback::{resolve, Resolution};
pub use matcher::match_best;
pub use normalize::{normalize, tokenize};
pub use selector::pick_response;
pub use similarity::{calculate_similarity, score_pattern, token_overlap};
pub use types::*;

// Python bindings
#[cfg(feature = "python")]
pub mod py;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn intent_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use py::*;
    m.add_class::<PyIntentEngine>()?;
    m.add_function(wrap_pyfunction!(py_normalize, m)?)?;
    m.add_function(wrap_pyfunction!(py_tokenize, m)?)?;
    m.add_function(wrap_pyfunction!(py_init_logging, m)?)?;
    Ok(())
}
