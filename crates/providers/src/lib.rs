//! Generation backend implementations for DocChat.
//!
//! Currently one backend: the Gemini `generateContent` API. The engine
//! depends only on the `GenerationProvider` trait from `docchat-core`,
//! so additional backends slot in without touching the relay.

pub mod classify;
pub mod gemini;

pub use classify::{FailureKind, classify_failure};
pub use gemini::GeminiProvider;
