//! Response selection

use rand::seq::SliceRandom;
use rand::Rng;

/// Uniformly pick one response using the supplied random source
///
/// An intent set never holds an intent without responses; an empty list
/// still yields `apology` rather than panicking.
pub fn pick_response<R: Rng + ?Sized>(responses: &[String], apology: &str, rng: &mut R) -> String {
    responses
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| apology.to_string())
}
