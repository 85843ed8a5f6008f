//! GenerationProvider trait — the abstraction over the text-generation backend.
//!
//! A provider knows how to send a composed request (system instruction plus
//! an ordered list of role-tagged turns) to a model API and return the
//! generated text. The engine depends only on this call contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::message::Role;

/// A single role-tagged turn in the outbound request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who said it (`user` or `model`)
    pub role: Role,

    /// The turn's literal text
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// A fully composed generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The model to use (fixed in configuration, not user-selectable)
    pub model: String,

    /// System-level instruction string (preamble, rules, context block)
    pub system_instruction: String,

    /// Ordered turns: trimmed history, then the new query last
    pub turns: Vec<Turn>,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens to generate
    pub max_output_tokens: u32,
}

/// Token usage statistics, when the backend reports them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A complete response from the generation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// The generated text. `None` when the backend returned no usable
    /// text part — the relay substitutes a fixed fallback sentence.
    pub text: Option<String>,

    /// Which model actually responded
    pub model: String,

    /// Token usage, if reported
    pub usage: Option<Usage>,
}

/// The generation backend trait.
///
/// The relay calls `generate()` without knowing which backend is in use.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// A human-readable name for this provider (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send a composed request and get a complete response.
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<GenerationResponse, ProviderError>;
}
