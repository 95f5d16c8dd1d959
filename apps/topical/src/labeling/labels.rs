//! Label-set extraction over previously generated topic labels.

use std::collections::BTreeSet;

/// Returns the distinct lower-cased single-word label set.
///
/// Labels containing whitespace are dropped, casing collapses, and the
/// result is order-independent.
pub fn distinct_single_word_labels(labels: &[String]) -> BTreeSet<String> {
    labels
        .iter()
        .map(|label| label.trim().to_lowercase())
        .filter(|label| !label.is_empty() && !label.contains(char::is_whitespace))
        .collect()
}
