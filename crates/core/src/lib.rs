//! # DocChat Core
//!
//! Domain types, traits, and error definitions for the DocChat long-context
//! document chat engine. This crate has **zero framework dependencies** — it
//! defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The generation backend is defined as a trait here. Implementations live
//! in their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod document;
pub mod error;
pub mod language;
pub mod message;
pub mod model_config;
pub mod provider;
pub mod token;

// Re-export key types at crate root for ergonomics
pub use document::{Document, DocumentId};
pub use error::{ChatError, Error, ProviderError, Result};
pub use language::Language;
pub use message::{Message, Role};
pub use model_config::ModelConfig;
pub use provider::{GenerationProvider, GenerationRequest, GenerationResponse, Turn, Usage};
pub use token::estimate_tokens;
