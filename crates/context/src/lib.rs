//! Context-window budgeting and prompt composition — the core engine.
//!
//! Given the session's documents, history, and the new query, this crate
//! decides what fits into the model's context window and assembles the
//! outbound request:
//!
//! 1. **Planner** — walks the document list in order, including full
//!    documents while they fit under the token ceiling, cutting the first
//!    overflowing document to a character prefix, and omitting the rest.
//! 2. **Composer** — builds the system instruction (grounding rules,
//!    language directive, optional truncation disclosure, knowledge base)
//!    and the role-tagged turn list (sliding history window + new query).
//!
//! Both are pure and stateless: identical inputs always produce identical
//! outputs, so the engine is testable without any UI or network harness.

pub mod composer;
pub mod planner;

pub use composer::{ComposedPrompt, HISTORY_WINDOW, compose};
pub use docchat_core::token::estimate_tokens;
pub use planner::{BudgetPlan, CONTEXT_TOKEN_CEILING, PlanEntry, TRUNCATION_MARKER, plan};
