/// LLM Client — the single point of entry for all generation-service calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// Generation code depends on the `TextGenerator` trait; `LlmClient` is the
/// production implementation carried in `AppState`.
///
/// One HTTP request per call. No retries: callers decide between fallback
/// and propagation.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// Default model; overridable through `GEMINI_MODEL`.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Missing API credential: {0} is not set")]
    MissingCredential(&'static str),
}

/// Shape of the response the caller wants back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Text,
    /// Asks the service for a machine-readable JSON body.
    Json,
}

/// A single user-role prompt plus the requested response format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub format: ResponseFormat,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            format: ResponseFormat::Text,
        }
    }

    pub fn json(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            format: ResponseFormat::Json,
        }
    }
}

/// The generation seam. Implement this to swap the backing service without
/// touching the generators or handlers.
///
/// Carried in `AppState` as `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the non-empty, trimmed text of the first candidate.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError>;
}

/// Calls the generator in JSON mode and deserializes the reply.
pub async fn generate_json<T: DeserializeOwned>(
    generator: &dyn TextGenerator,
    prompt: String,
) -> Result<T, LlmError> {
    let text = generator.generate(&GenerationRequest::json(prompt)).await?;
    // Strip markdown code fences if the model wraps JSON in them
    let text = strip_json_fences(&text);
    serde_json::from_str(text).map_err(LlmError::Parse)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'a str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GeminiResponse {
    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        Some(text)
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// The production generation client, wrapping the Gemini `generateContent` API.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl LlmClient {
    /// Fails before any network activity when the credential is blank.
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self, LlmError> {
        if api_key.trim().is_empty() {
            return Err(LlmError::MissingCredential("GEMINI_API_KEY"));
        }
        let client = Client::builder().timeout(timeout).build()?;
        let endpoint = format!("{GEMINI_API_BASE}/{model}:generateContent");
        Ok(Self {
            client,
            api_key,
            model,
            endpoint,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a raw call to the service, returning the full response object.
    pub async fn call(&self, request: &GenerationRequest) -> Result<GeminiResponse, LlmError> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart {
                    text: &request.prompt,
                }],
            }],
            generation_config: match request.format {
                ResponseFormat::Json => Some(GenerationConfig {
                    response_mime_type: "application/json",
                }),
                ResponseFormat::Text => None,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let gemini_response: GeminiResponse = response.json().await?;

        if let Some(usage) = &gemini_response.usage_metadata {
            debug!(
                "LLM call succeeded: model={}, prompt_tokens={}, output_tokens={}",
                self.model, usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(gemini_response)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let response = self.call(request).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text.to_string())
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Closure-backed generator for tests.
#[cfg(test)]
pub mod fake {
    use super::*;

    pub struct FnGenerator<F>(pub F);

    #[async_trait]
    impl<F> TextGenerator for FnGenerator<F>
    where
        F: Fn(&GenerationRequest) -> Result<String, LlmError> + Send + Sync,
    {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
            (self.0)(request)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FnGenerator;
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_blank_api_key_is_a_configuration_error() {
        let result = LlmClient::new(
            "  ".to_string(),
            DEFAULT_MODEL.to_string(),
            Duration::from_secs(5),
        );
        assert!(matches!(
            result,
            Err(LlmError::MissingCredential("GEMINI_API_KEY"))
        ));
    }

    #[test]
    fn test_request_json_mode_sets_mime_type() {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart { text: "hi" }],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
            }),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
    }

    #[test]
    fn test_request_text_mode_omits_generation_config() {
        let body = GeminiRequest {
            contents: vec![],
            generation_config: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn test_response_text_joins_parts_of_first_candidate() {
        let response: GeminiResponse = serde_json::from_value(serde_json::json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Hello, "}, {"text": "world"}]}},
                {"content": {"role": "model", "parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 3, "candidatesTokenCount": 2}
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("Hello, world"));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(response.text().is_none());
    }

    #[tokio::test]
    async fn test_generate_json_parses_fenced_reply() {
        #[derive(Deserialize)]
        struct Reply {
            bullet_points: Vec<String>,
        }
        let generator = FnGenerator(|req: &GenerationRequest| {
            assert_eq!(req.format, ResponseFormat::Json);
            Ok("```json\n{\"bullet_points\": [\"Shipped\"]}\n```".to_string())
        });
        let reply: Reply = generate_json(&generator, "prompt".to_string()).await.unwrap();
        assert_eq!(reply.bullet_points, vec!["Shipped"]);
    }

    #[tokio::test]
    async fn test_generate_json_reports_parse_errors() {
        let generator = FnGenerator(|_: &GenerationRequest| Ok("not json".to_string()));
        let result: Result<serde_json::Value, _> =
            generate_json(&generator, "prompt".to_string()).await;
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }
}
