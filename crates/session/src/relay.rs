//! The response relay — drives one user query end to end.
//!
//! Plan the documents against the token ceiling, compose the prompt,
//! invoke the generation backend, and map the outcome to user-facing
//! text. The backend call is the single suspension point per query; the
//! `busy` flag on the session refuses a second submission while one is
//! outstanding (no queue, no cancellation).
//!
//! History stays consistent on failure: the user's message is appended
//! before the call, no model message is appended on failure, and the
//! error is surfaced alongside the existing history so the user can
//! retry by resubmitting.

use std::sync::Arc;

use docchat_context::{composer, planner};
use docchat_core::error::{ChatError, ProviderError};
use docchat_core::language::Language;
use docchat_core::message::Message;
use docchat_core::provider::{GenerationProvider, GenerationRequest};
use docchat_providers::{FailureKind, classify_failure};
use tracing::{debug, info};

use crate::session::ChatSession;

/// Surfaced when a provider error carried no message text of its own.
const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while communicating with the model.";

/// Orchestrates plan → compose → generate for a session.
pub struct ResponseRelay {
    /// `None` when no API credential is configured; every send is then
    /// refused before any request is issued.
    provider: Option<Arc<dyn GenerationProvider>>,
    model: String,
    ceiling: usize,
}

impl ResponseRelay {
    /// Create a relay over a configured backend.
    pub fn new(provider: Arc<dyn GenerationProvider>, model: impl Into<String>) -> Self {
        Self {
            provider: Some(provider),
            model: model.into(),
            ceiling: planner::CONTEXT_TOKEN_CEILING,
        }
    }

    /// Create a relay with no credential configured. Sends always fail
    /// with `MissingCredential` and never reach the network.
    pub fn without_credential(model: impl Into<String>) -> Self {
        Self {
            provider: None,
            model: model.into(),
            ceiling: planner::CONTEXT_TOKEN_CEILING,
        }
    }

    /// Override the context token ceiling (e.g., for tests).
    pub fn with_ceiling(mut self, ceiling: usize) -> Self {
        self.ceiling = ceiling;
        self
    }

    /// Submit one user query against the session.
    ///
    /// On success the reply text is returned and appended to the history
    /// with document attribution. An empty/absent text field from the
    /// backend is substituted with the language's fixed fallback
    /// sentence (that substitution is a success, not an error).
    pub async fn send(
        &self,
        session: &mut ChatSession,
        query: &str,
    ) -> Result<String, ChatError> {
        if session.busy {
            return Err(ChatError::Busy);
        }
        let Some(provider) = &self.provider else {
            return Err(ChatError::MissingCredential);
        };

        // Compose from the pre-submission history, then append the user
        // message so a failure still leaves it in place for a retry.
        let plan = planner::plan(&session.documents, self.ceiling);
        let composed = composer::compose(&plan, session.language, &session.messages, query);

        debug!(
            documents = session.documents.len(),
            included = plan.entries.len(),
            used_tokens = plan.used_tokens,
            truncated = plan.truncated,
            turns = composed.turns.len(),
            "Composed generation request"
        );

        session.push_message(Message::user(query));
        session.busy = true;

        let request = GenerationRequest {
            model: self.model.clone(),
            system_instruction: composed.system_instruction,
            turns: composed.turns,
            temperature: session.model_config.temperature,
            max_output_tokens: session.model_config.max_output_tokens,
        };

        let result = provider.generate(request).await;
        session.busy = false;

        match result {
            Ok(response) => {
                let text = response.text.unwrap_or_else(|| {
                    session.language.empty_response_fallback().to_string()
                });
                info!(chars = text.len(), "Generation succeeded");
                let sources = session.document_names();
                session.push_message(Message::model_with_sources(&text, sources));
                Ok(text)
            }
            Err(err) => Err(surface(&err, session.language)),
        }
    }
}

/// Map a provider error to its user-facing form. Quota errors get the
/// fixed retry-later notice instead of the raw error text; everything
/// else surfaces the provider's own message.
fn surface(err: &ProviderError, language: Language) -> ChatError {
    match classify_failure(err) {
        FailureKind::QuotaExceeded => ChatError::QuotaExceeded {
            notice: language.quota_notice().to_string(),
        },
        FailureKind::GenerationFailure => {
            let message = match err {
                ProviderError::ApiError { message, .. } if message.trim().is_empty() => {
                    GENERIC_FAILURE_MESSAGE.to_string()
                }
                other => other.to_string(),
            };
            ChatError::GenerationFailure(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use docchat_core::document::Document;
    use docchat_core::message::Role;
    use docchat_core::provider::GenerationResponse;
    use std::sync::Mutex;

    /// Scripted backend: returns a fixed outcome and records requests.
    struct StubProvider {
        outcome: Mutex<Option<Result<GenerationResponse, ProviderError>>>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl StubProvider {
        fn replying(text: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                outcome: Mutex::new(Some(Ok(GenerationResponse {
                    text: text.map(String::from),
                    model: "gemini-2.5-flash".into(),
                    usage: None,
                }))),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(err: ProviderError) -> Arc<Self> {
            Arc::new(Self {
                outcome: Mutex::new(Some(Err(err))),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl GenerationProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn generate(
            &self,
            request: GenerationRequest,
        ) -> Result<GenerationResponse, ProviderError> {
            self.seen.lock().unwrap().push(request);
            self.outcome.lock().unwrap().take().expect("one call only")
        }
    }

    fn session_with_doc() -> ChatSession {
        let mut session = ChatSession::new();
        session.add_document(Document::new(
            "report.txt",
            "text/plain",
            "Revenue grew 12% in Q3.",
        ));
        session
    }

    #[tokio::test]
    async fn successful_send_appends_both_messages() {
        let provider = StubProvider::replying(Some("Revenue grew 12%, per report.txt."));
        let relay = ResponseRelay::new(provider.clone(), "gemini-2.5-flash");
        let mut session = session_with_doc();

        let reply = relay.send(&mut session, "How did revenue do?").await.unwrap();
        assert_eq!(reply, "Revenue grew 12%, per report.txt.");

        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[0].role, Role::User);
        assert_eq!(session.messages[1].role, Role::Model);
        assert_eq!(session.messages[1].sources, vec!["report.txt".to_string()]);
        assert!(!session.busy);
    }

    #[tokio::test]
    async fn request_carries_session_config_and_context() {
        let provider = StubProvider::replying(Some("ok"));
        let relay = ResponseRelay::new(provider.clone(), "gemini-2.5-flash");
        let mut session = session_with_doc();
        session.model_config.set_temperature(0.7);
        session.model_config.set_max_output_tokens(500);

        relay.send(&mut session, "q").await.unwrap();

        let seen = provider.seen.lock().unwrap();
        let req = &seen[0];
        assert_eq!(req.model, "gemini-2.5-flash");
        assert!((req.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(req.max_output_tokens, 500);
        assert!(req.system_instruction.contains("report.txt"));
        assert_eq!(req.turns.last().unwrap().text, "q");
    }

    #[tokio::test]
    async fn empty_text_substitutes_language_fallback() {
        let provider = StubProvider::replying(None);
        let relay = ResponseRelay::new(provider, "gemini-2.5-flash");
        let mut session = session_with_doc();
        session.set_language(Language::Am);

        let reply = relay.send(&mut session, "q").await.unwrap();
        assert_eq!(reply, Language::Am.empty_response_fallback());
        // Still a success: the fallback is appended as the model message
        assert_eq!(session.messages.len(), 2);
    }

    #[tokio::test]
    async fn quota_error_surfaces_fixed_notice() {
        let provider = StubProvider::failing(ProviderError::RateLimited);
        let relay = ResponseRelay::new(provider, "gemini-2.5-flash");
        let mut session = session_with_doc();

        let err = relay.send(&mut session, "q").await.unwrap_err();
        assert_eq!(err.to_string(), Language::En.quota_notice());
    }

    #[tokio::test]
    async fn error_message_containing_429_surfaces_quota_notice() {
        let provider = StubProvider::failing(ProviderError::ApiError {
            status_code: 400,
            message: "upstream said 429 RESOURCE_EXHAUSTED".into(),
        });
        let relay = ResponseRelay::new(provider, "gemini-2.5-flash");
        let mut session = session_with_doc();
        session.set_language(Language::Am);

        let err = relay.send(&mut session, "q").await.unwrap_err();
        assert_eq!(err.to_string(), Language::Am.quota_notice());
    }

    #[tokio::test]
    async fn other_errors_surface_original_message() {
        let provider = StubProvider::failing(ProviderError::AuthenticationFailed(
            "Invalid Gemini API key".into(),
        ));
        let relay = ResponseRelay::new(provider, "gemini-2.5-flash");
        let mut session = session_with_doc();

        let err = relay.send(&mut session, "q").await.unwrap_err();
        assert!(err.to_string().contains("Invalid Gemini API key"));
    }

    #[tokio::test]
    async fn empty_error_message_gets_generic_fallback() {
        let provider = StubProvider::failing(ProviderError::ApiError {
            status_code: 500,
            message: "  ".into(),
        });
        let relay = ResponseRelay::new(provider, "gemini-2.5-flash");
        let mut session = session_with_doc();

        let err = relay.send(&mut session, "q").await.unwrap_err();
        assert_eq!(err.to_string(), GENERIC_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn failure_keeps_user_message_and_no_model_message() {
        let provider = StubProvider::failing(ProviderError::Network("connection reset".into()));
        let relay = ResponseRelay::new(provider, "gemini-2.5-flash");
        let mut session = session_with_doc();

        let _ = relay.send(&mut session, "my question").await.unwrap_err();

        assert_eq!(session.messages.len(), 1);
        assert_eq!(session.messages[0].role, Role::User);
        assert_eq!(session.messages[0].content, "my question");
        assert!(!session.busy);
    }

    #[tokio::test]
    async fn missing_credential_never_reaches_provider() {
        let relay = ResponseRelay::without_credential("gemini-2.5-flash");
        let mut session = session_with_doc();

        let err = relay.send(&mut session, "q").await.unwrap_err();
        assert!(matches!(err, ChatError::MissingCredential));
        assert!(session.messages.is_empty());
    }

    #[tokio::test]
    async fn busy_session_refuses_second_submission() {
        let provider = StubProvider::replying(Some("ok"));
        let relay = ResponseRelay::new(provider, "gemini-2.5-flash");
        let mut session = session_with_doc();
        session.busy = true;

        let err = relay.send(&mut session, "q").await.unwrap_err();
        assert!(matches!(err, ChatError::Busy));
        assert!(session.messages.is_empty());
    }

    #[tokio::test]
    async fn history_window_applies_before_new_query() {
        let provider = StubProvider::replying(Some("ok"));
        let relay = ResponseRelay::new(provider.clone(), "gemini-2.5-flash");
        let mut session = ChatSession::new();
        for i in 0..15 {
            session.push_message(if i % 2 == 0 {
                Message::user(format!("q{i}"))
            } else {
                Message::model(format!("a{i}"))
            });
        }

        relay.send(&mut session, "latest").await.unwrap();

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen[0].turns.len(), 11);
        assert_eq!(seen[0].turns.last().unwrap().text, "latest");
    }
}
