//! Chat session state.
//!
//! Shared mutable state is confined to three value collections — the
//! document list, the message history, and the model configuration —
//! each owned by one session and mutated only through the operations
//! here. No concurrent mutation from two in-flight operations is
//! supported; the `busy` flag serializes submissions.

use docchat_core::document::{Document, DocumentId};
use docchat_core::language::Language;
use docchat_core::message::Message;
use docchat_core::model_config::ModelConfig;
use serde::{Deserialize, Serialize};

/// One user's chat session: documents, history, and generation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatSession {
    /// Uploaded documents, in upload order
    pub documents: Vec<Document>,

    /// Append-only message history (until cleared)
    pub messages: Vec<Message>,

    /// Generation parameters
    pub model_config: ModelConfig,

    /// Response language selector
    pub language: Language,

    /// True while a submission is outstanding. A second submission is
    /// refused, not queued.
    #[serde(default, skip_serializing)]
    pub busy: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document to the set.
    pub fn add_document(&mut self, document: Document) {
        self.documents.push(document);
    }

    /// Remove a document by id. Returns whether anything was removed.
    pub fn remove_document(&mut self, id: &DocumentId) -> bool {
        let before = self.documents.len();
        self.documents.retain(|d| &d.id != id);
        self.documents.len() != before
    }

    /// Append a message to the history.
    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Replace the entire message list (clear-chat).
    pub fn replace_messages(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    /// Update the response language.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Sum of cached token estimates over the document set.
    pub fn total_document_tokens(&self) -> usize {
        self.documents.iter().map(|d| d.tokens).sum()
    }

    /// Display names of all loaded documents, in order.
    pub fn document_names(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.name.clone()).collect()
    }
}
