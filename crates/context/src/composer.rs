//! Prompt composition.
//!
//! Builds the full instruction payload sent to the generation backend:
//! one system-level instruction string plus an ordered list of
//! role-tagged turns ending with the new user query.

use docchat_core::language::Language;
use docchat_core::message::Message;
use docchat_core::provider::Turn;

use crate::planner::BudgetPlan;

/// How many of the most recent history messages are included. Older
/// history is silently dropped, not summarized.
pub const HISTORY_WINDOW: usize = 10;

/// Fixed role/behavior preamble with numbered grounding rules.
const SYSTEM_PREAMBLE: &str = "\
You are an intelligent RAG (Retrieval Augmented Generation) assistant.
Your goal is to answer the user's question using ONLY the provided documents below.

Instructions:
1. Analyze the provided documents carefully.
2. If the answer is found in the documents, provide a clear, concise answer and cite the document name.
3. If the answer is NOT in the documents, politely state that the information is not available in the knowledge base.
4. Do not make up information outside of the provided context.
5. Maintain a helpful and professional tone.";

/// Included in the system instruction only when the plan cut or omitted
/// content.
const TRUNCATION_DISCLOSURE: &str = "\
Note: the knowledge base below was truncated to fit the context window, \
so some documents may be partial or missing.";

/// A composed request body, ready to hand to the generation provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPrompt {
    /// The single system-level instruction string
    pub system_instruction: String,

    /// Trimmed history followed by the new query as the final turn
    pub turns: Vec<Turn>,
}

/// Compose the outbound prompt from a budget plan, the language
/// selector, the conversation history, and the new user query.
///
/// Turn order is preserved; the new query is always the last turn; the
/// role mapping for history entries is 1:1 (`user`→`user`,
/// `model`→`model`).
pub fn compose(
    plan: &BudgetPlan,
    language: Language,
    history: &[Message],
    query: &str,
) -> ComposedPrompt {
    let mut system_instruction = String::from(SYSTEM_PREAMBLE);
    system_instruction.push_str("\n\n");
    system_instruction.push_str(language.directive());

    if plan.truncated {
        system_instruction.push_str("\n\n");
        system_instruction.push_str(TRUNCATION_DISCLOSURE);
    }

    system_instruction.push_str("\n\nKNOWLEDGE BASE:\n");
    system_instruction.push_str(&plan.context_block());

    let window_start = history.len().saturating_sub(HISTORY_WINDOW);
    let mut turns: Vec<Turn> = history[window_start..]
        .iter()
        .map(|msg| Turn {
            role: msg.role,
            text: msg.content.clone(),
        })
        .collect();

    turns.push(Turn::user(query));

    ComposedPrompt {
        system_instruction,
        turns,
    }
}
