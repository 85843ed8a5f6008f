//! Session state and request orchestration for DocChat.
//!
//! A [`ChatSession`] owns the three mutable collections of a chat —
//! document set, message history, model configuration — and the
//! [`ResponseRelay`] drives one query end to end: budget the documents,
//! compose the prompt, call the generation backend, and map failures or
//! empty output to user-facing text.

pub mod ingest;
pub mod relay;
pub mod session;

pub use ingest::{
    DocumentExtractor, EXTRACTION_FAILURE_PLACEHOLDER, ExtractionError, TextExtractor,
    ingest_files, page_marker,
};
pub use relay::ResponseRelay;
pub use session::ChatSession;
