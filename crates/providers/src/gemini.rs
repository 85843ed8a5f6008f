//! Gemini provider implementation.
//!
//! Uses the Generative Language `generateContent` API directly.
//!
//! Features:
//! - `x-goog-api-key` header authentication (not Bearer)
//! - System instruction as a top-level field
//! - Role-tagged `contents` with `user` / `model` turns
//! - `generationConfig` for temperature and output cap

use async_trait::async_trait;
use docchat_core::error::ProviderError;
use docchat_core::message::Role;
use docchat_core::provider::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini `generateContent` API provider.
pub struct GeminiProvider {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(300)) // large contexts are slow
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: "gemini".into(),
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Convert turns to the Gemini `contents` wire format.
    fn to_api_contents(turns: &[Turn]) -> Vec<GeminiContent> {
        turns
            .iter()
            .map(|turn| GeminiContent {
                role: match turn.role {
                    Role::User => "user".into(),
                    Role::Model => "model".into(),
                },
                parts: vec![GeminiPart {
                    text: turn.text.clone(),
                }],
            })
            .collect()
    }

    /// Extract the generated text from an API response. `None` when the
    /// first candidate carries no non-empty text part.
    fn extract_text(resp: &GeminiResponse) -> Option<String> {
        let candidate = resp.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("");
        if text.is_empty() { None } else { Some(text) }
    }
}

#[async_trait]
impl GenerationProvider for GeminiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<GenerationResponse, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, request.model
        );

        let body = GeminiRequest {
            contents: Self::to_api_contents(&request.turns),
            system_instruction: GeminiSystemInstruction {
                parts: vec![GeminiPart {
                    text: request.system_instruction.clone(),
                }],
            },
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            },
        };

        debug!(
            provider = "gemini",
            model = %request.model,
            turns = request.turns.len(),
            "Sending generation request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(e.to_string())
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited);
        }
        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "Invalid Gemini API key".into(),
            ));
        }
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Gemini API error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_resp: GeminiResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status_code: 200,
                message: format!("Failed to parse Gemini response: {e}"),
            })?;

        let text = Self::extract_text(&api_resp);
        let usage = api_resp.usage_metadata.map(|u| Usage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        Ok(GenerationResponse {
            text,
            model: api_resp.model_version.unwrap_or(request.model),
            usage,
        })
    }
}

// --- Gemini API types ---

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction")]
    system_instruction: GeminiSystemInstruction,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

// Request parts always carry text; response parts may not (e.g. a
// function-call part), so the two sides get distinct types.
#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct GeminiSystemInstruction {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default, rename = "usageMetadata")]
    usage_metadata: Option<GeminiUsageMetadata>,
    #[serde(default, rename = "modelVersion")]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiUsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt_token_count: u32,
    #[serde(rename = "candidatesTokenCount")]
    candidates_token_count: u32,
    #[serde(rename = "totalTokenCount")]
    total_token_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor() {
        let provider = GeminiProvider::new("AIza-test");
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn constructor_with_base_url() {
        let provider = GeminiProvider::new("AIza-test").with_base_url("https://proxy.example.com/");
        assert_eq!(provider.base_url, "https://proxy.example.com");
    }

    #[test]
    fn turn_conversion_maps_roles() {
        let turns = vec![Turn::user("Hello"), Turn::model("Hi!"), Turn::user("More")];
        let contents = GeminiProvider::to_api_contents(&turns);
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0].role, "user");
        assert_eq!(contents[1].role, "model");
        assert_eq!(contents[2].role, "user");
        assert_eq!(contents[0].parts[0].text, "Hello");
    }

    #[test]
    fn request_body_shape() {
        let body = GeminiRequest {
            contents: GeminiProvider::to_api_contents(&[Turn::user("q")]),
            system_instruction: GeminiSystemInstruction {
                parts: vec![GeminiPart {
                    text: "You answer from documents.".into(),
                }],
            },
            generation_config: GeminiGenerationConfig {
                temperature: 0.3,
                max_output_tokens: 2048,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "q");
        assert_eq!(
            json["systemInstruction"]["parts"][0]["text"],
            "You answer from documents."
        );
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 2048);
        assert!((json["generationConfig"]["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn parse_text_response() {
        let resp: GeminiResponse = serde_json::from_str(
            r#"{
                "candidates": [
                    {"content": {"parts": [{"text": "The warranty lasts two years."}], "role": "model"}}
                ],
                "usageMetadata": {"promptTokenCount": 120, "candidatesTokenCount": 9, "totalTokenCount": 129},
                "modelVersion": "gemini-2.5-flash"
            }"#,
        )
        .unwrap();

        assert_eq!(
            GeminiProvider::extract_text(&resp).as_deref(),
            Some("The warranty lasts two years.")
        );
        let usage = resp.usage_metadata.unwrap();
        assert_eq!(usage.total_token_count, 129);
    }

    #[test]
    fn parse_multi_part_response_concatenates() {
        let resp: GeminiResponse = serde_json::from_str(
            r#"{
                "candidates": [
                    {"content": {"parts": [{"text": "Part one. "}, {"text": "Part two."}]}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(
            GeminiProvider::extract_text(&resp).as_deref(),
            Some("Part one. Part two.")
        );
    }

    #[test]
    fn empty_candidates_yield_no_text() {
        let resp: GeminiResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert_eq!(GeminiProvider::extract_text(&resp), None);
    }

    #[test]
    fn response_part_without_text_yields_none() {
        let resp: GeminiResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"parts": [{}]}}]}"#).unwrap();
        assert_eq!(GeminiProvider::extract_text(&resp), None);
    }

    #[test]
    fn empty_text_part_yields_no_text() {
        let resp: GeminiResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": ""}]}}]}"#,
        )
        .unwrap();
        assert_eq!(GeminiProvider::extract_text(&resp), None);
    }
}
