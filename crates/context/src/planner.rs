//! Context budget planner.
//!
//! Transforms an ordered list of documents into a single context block
//! whose estimated token cost, together with per-document wrapper
//! overhead, stays within a fixed ceiling.
//!
//! The walk is strict, sequential, and order-preserving — this is a
//! scope/safety limit, not a ranking step, so documents are never
//! reordered by size or relevance and the budget is never backfilled
//! with smaller documents after the first overflow.

use docchat_core::document::Document;
use docchat_core::token::estimate_tokens;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Token ceiling for the assembled context block.
///
/// Chosen as a safety margin below the provider's real input-token quota
/// of ~250k, so a full context never trips a provider-side quota error.
pub const CONTEXT_TOKEN_CEILING: usize = 240_000;

/// Appended to a document's content when it was cut to fit the budget.
pub const TRUNCATION_MARKER: &str =
    "\n[... truncated: remaining content omitted to fit the context window ...]";

const BLOCK_SEPARATOR: &str = "\n\n";

fn header(name: &str) -> String {
    format!("--- START DOCUMENT: {name} ---\n")
}

fn footer(name: &str) -> String {
    format!("\n--- END DOCUMENT: {name} ---")
}

/// Header + footer + separator token cost for one document. Recomputed
/// per document because the display name length varies.
fn wrapper_overhead(name: &str) -> usize {
    estimate_tokens(&header(name))
        + estimate_tokens(&footer(name))
        + estimate_tokens(BLOCK_SEPARATOR)
}

/// One included document in the plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Display name, used in the wrapper markers
    pub name: String,

    /// The included portion of the document's content
    pub content: String,

    /// Whether this document's content was cut
    pub truncated: bool,
}

/// The result of budgeting a document list. Constructed fresh per
/// request; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetPlan {
    /// Included documents, in original list order
    pub entries: Vec<PlanEntry>,

    /// Cumulative estimated tokens committed (content + wrapper overhead)
    pub used_tokens: usize,

    /// True when any content was cut or any document wholly omitted
    pub truncated: bool,
}

impl BudgetPlan {
    /// Render the concatenated, marker-wrapped context block.
    pub fn context_block(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}{}{}", header(&e.name), e.content, footer(&e.name)))
            .collect::<Vec<_>>()
            .join(BLOCK_SEPARATOR)
    }
}

/// Largest index `<= index` that lands on a UTF-8 char boundary of `s`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Budget the document list against `ceiling` estimated tokens.
///
/// # Algorithm
///
/// For each document in input order:
/// 1. If the running total plus this document's wrapper overhead already
///    reaches the ceiling, stop entirely — this document and all later
///    ones are omitted.
/// 2. Otherwise, if the document's own token estimate exceeds what
///    remains, include a character prefix sized to `available × 4` chars
///    (floored to a char boundary), append the truncation marker, mark
///    the budget full, and stop.
/// 3. Otherwise include the full content and continue.
pub fn plan(documents: &[Document], ceiling: usize) -> BudgetPlan {
    let mut used_tokens: usize = 0;
    let mut truncated = false;
    let mut entries: Vec<PlanEntry> = Vec::new();

    for doc in documents {
        let overhead = wrapper_overhead(&doc.name);

        if used_tokens + overhead >= ceiling {
            debug!(
                document = %doc.name,
                used_tokens,
                ceiling,
                "Budget exhausted before wrapper; omitting this and all later documents"
            );
            truncated = true;
            break;
        }

        let available = ceiling - used_tokens - overhead;

        if doc.tokens > available {
            let char_limit = available * 4;
            let cut = floor_char_boundary(&doc.content, char_limit);
            let mut content = doc.content[..cut].to_string();
            content.push_str(TRUNCATION_MARKER);

            debug!(
                document = %doc.name,
                document_tokens = doc.tokens,
                available,
                included_chars = cut,
                "Cutting document to a prefix; later documents omitted"
            );

            entries.push(PlanEntry {
                name: doc.name.clone(),
                content,
                truncated: true,
            });
            used_tokens = ceiling;
            truncated = true;
            break;
        }

        entries.push(PlanEntry {
            name: doc.name.clone(),
            content: doc.content.clone(),
            truncated: false,
        });
        used_tokens += doc.tokens + overhead;
    }

    BudgetPlan {
        entries,
        used_tokens,
        truncated,
    }
}
