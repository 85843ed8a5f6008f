//! Error types for the DocChat domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all DocChat operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Request-boundary (chat) errors ---
    #[error("{0}")]
    Chat(#[from] ChatError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Transport-level errors from the generation backend.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider (HTTP 429)")]
    RateLimited,

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Errors surfaced at the request boundary, with user-presentable text.
///
/// A failed generation attempt never corrupts conversation history: the
/// user's message is already appended before the call, no model message
/// is appended on failure, and the error is shown alongside the existing
/// history so the user can retry by resubmitting.
#[derive(Debug, Clone, Error)]
pub enum ChatError {
    /// No API key configured; detected before issuing a request.
    #[error("No API key configured. Set DOCCHAT_API_KEY or add api_key to the config file.")]
    MissingCredential,

    /// The provider signalled rate/quota limiting. `notice` is the fixed,
    /// language-appropriate retry-later sentence, surfaced verbatim in
    /// place of the raw error text.
    #[error("{notice}")]
    QuotaExceeded { notice: String },

    /// Any other provider-side failure, surfacing the provider's message
    /// (or a generic fallback when none was present).
    #[error("{0}")]
    GenerationFailure(String),

    /// A prior submission is still outstanding. One in-flight request per
    /// session; no queue.
    #[error("A request is already in progress. Wait for it to finish before sending another.")]
    Busy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_status() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 500,
            message: "Internal server error".into(),
        });
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("Internal server error"));
    }

    #[test]
    fn quota_error_surfaces_notice_verbatim() {
        let err = ChatError::QuotaExceeded {
            notice: "Quota exceeded. Please wait a moment and try again.".into(),
        };
        assert_eq!(
            err.to_string(),
            "Quota exceeded. Please wait a moment and try again."
        );
    }

    #[test]
    fn generation_failure_surfaces_original_message() {
        let err = ChatError::GenerationFailure("model is overloaded".into());
        assert_eq!(err.to_string(), "model is overloaded");
    }
}
