//! Document domain type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::token::estimate_tokens;

/// Unique identifier for an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A document in the session's knowledge base.
///
/// Immutable once created; owned exclusively by the session's document
/// set and destroyed on explicit removal or session reset. The token
/// estimate is derived from the content and cached at ingestion time so
/// the planner never re-tokenizes full documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Opaque identity
    pub id: DocumentId,

    /// Display name (usually the file name)
    pub name: String,

    /// Content-type label (e.g. "text/plain", "application/pdf")
    pub content_type: String,

    /// Full extracted text content
    pub content: String,

    /// Estimated token count of `content`, cached at construction
    pub tokens: usize,
}

impl Document {
    /// Create a document, deriving its id and token estimate.
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        let tokens = estimate_tokens(&content);
        Self {
            id: DocumentId::new(),
            name: name.into(),
            content_type: content_type.into(),
            content,
            tokens,
        }
    }
}
