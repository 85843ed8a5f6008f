//! Failure classification for provider errors.
//!
//! The relay needs exactly one decision from a raw error description:
//! is this quota/rate limiting (surface the fixed retry-later notice) or
//! anything else (surface the original message)? The substring check is
//! a deliberate heuristic, isolated here so it can be refined in one
//! place.

use docchat_core::error::ProviderError;

/// The two ways a generation attempt can fail, from the user's point of
/// view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Rate/quota limiting — surfaced with a fixed retry-later notice,
    /// never the raw error text. Not automatically retried.
    QuotaExceeded,
    /// Everything else — surfaced with the provider's own message.
    GenerationFailure,
}

/// Classify a provider error.
///
/// `RateLimited` is always quota. For other variants the error text is
/// scanned for the substring "429", which providers commonly embed in
/// quota-exceeded payloads even when the transport status was mapped
/// away.
pub fn classify_failure(err: &ProviderError) -> FailureKind {
    match err {
        ProviderError::RateLimited => FailureKind::QuotaExceeded,
        other if other.to_string().contains("429") => FailureKind::QuotaExceeded,
        _ => FailureKind::GenerationFailure,
    }
}
