//! Message domain types.
//!
//! These are the core value objects that flow through the system:
//! the user submits a query → the relay sends it to the provider →
//! the model's reply is appended to the session history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role of a message sender in a conversation.
///
/// Exactly two roles exist; the wire format has no system role in the
/// turn list (system instructions travel as a separate top-level field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The generation model
    Model,
}

impl Role {
    /// The wire-format tag for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// A single message in a chat session.
///
/// Immutable once appended; history is an append-only ordered sequence
/// until cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Timestamp
    pub timestamp: DateTime<Utc>,

    /// Display names of documents this reply drew on. Attribution only —
    /// names, not references into the document set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
            sources: Vec::new(),
        }
    }

    /// Create a new model message.
    pub fn model(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Model,
            content: content.into(),
            timestamp: Utc::now(),
            sources: Vec::new(),
        }
    }

    /// Create a model message with document attribution.
    pub fn model_with_sources(content: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            sources,
            ..Self::model(content)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_message() {
        let msg = Message::user("What does chapter 3 say?");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "What does chapter 3 say?");
        assert!(msg.sources.is_empty());
    }

    #[test]
    fn model_message_carries_sources() {
        let msg = Message::model_with_sources("See the report.", vec!["report.txt".into()]);
        assert_eq!(msg.role, Role::Model);
        assert_eq!(msg.sources, vec!["report.txt".to_string()]);
    }

    #[test]
    fn role_wire_tags() {
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(Role::Model.as_str(), "model");
    }

    #[test]
    fn message_serialization_roundtrip() {
        let msg = Message::user("Test message");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"user\""));
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.content, "Test message");
        assert_eq!(deserialized.role, Role::User);
    }
}
