//! Token estimation.
//!
//! One heuristic for the whole system: a token costs roughly four
//! characters. Documents cache their estimate through this function at
//! ingestion, and the planner re-applies it to every prefix it
//! considers, so the running budget stays additive with the cached
//! counts. Within ~10% of real BPE tokenizers on English prose.

/// Estimate how many tokens `text` will cost, at ~4 characters per
/// token, rounding up. Empty input costs nothing.
pub fn estimate_tokens(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    (text.len() + 3) / 4
}
