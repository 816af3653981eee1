/// Gemini content generation adapter
///
/// Calls the Google Generative Language API's non-streaming
/// `generateContent` endpoint. One prompt in, one candidate out; the
/// adapter never surfaces a failure to its caller (see the module-level
/// contract in [`super`]).
///
/// # Request/Response shape
///
/// ```text
/// POST https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent
/// x-goog-api-key: {api_key}
///
/// { "contents": [ { "parts": [ { "text": "<prompt>" } ] } ] }
/// ```
///
/// The response carries `candidates[].content.parts[].text`; parts of the
/// first candidate are concatenated.

use super::{draft_placeholder, Generated, Generator};
use crate::config::AiConfig;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

/// Google Generative Language API base URL.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Error type for Gemini API calls
///
/// Internal to the adapter: every variant is absorbed into a degraded
/// fallback before it reaches a route handler.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// No API key configured
    #[error("No API key configured")]
    MissingApiKey,

    /// Transport-level failure
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response carried no usable text
    #[error("Response contained no candidates")]
    EmptyResponse,
}

/// Gemini error response envelope.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: GoogleError,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    code: Option<u16>,
    message: String,
}

/// Response body of `generateContent`.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenates the text parts of the first candidate.
    fn into_text(self) -> Result<String, GeminiError> {
        let text = self
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            Err(GeminiError::EmptyResponse)
        } else {
            Ok(text)
        }
    }
}

/// Builds the draft prompt for a section title.
fn draft_prompt(title: &str) -> String {
    format!(
        "Write a detailed, professional section for the topic: {}.",
        title
    )
}

/// Builds the rewrite prompt from the current text and an instruction.
fn rewrite_prompt(existing: &str, instruction: &str) -> String {
    format!(
        "Rewrite the following text based on the instruction.\n\n\
         Original text:\n{}\n\n\
         Instruction:\n{}\n\n\
         Return the improved version.",
        existing, instruction
    )
}

/// Production content generation adapter backed by the Gemini API
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiGenerator {
    /// Creates a generator from the AI configuration.
    pub fn new(config: &AiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Sends one prompt and returns the generated text.
    async fn complete(&self, prompt: &str) -> Result<String, GeminiError> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::MissingApiKey)?;

        let url = format!("{}/{}:generateContent", GEMINI_API_BASE, self.model);
        let body = json!({
            "contents": [ { "parts": [ { "text": prompt } ] } ]
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(envelope) = serde_json::from_str::<ErrorResponse>(&error_text) {
                return Err(GeminiError::Api {
                    status: envelope.error.code.unwrap_or(status.as_u16()),
                    message: envelope.error.message,
                });
            }

            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        parsed.into_text()
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn draft(&self, title: &str) -> Generated {
        match self.complete(&draft_prompt(title)).await {
            Ok(text) => Generated::ok(text),
            Err(e) => {
                warn!(section_title = title, error = %e, "Draft generation degraded");
                Generated::fallback(draft_placeholder(title))
            }
        }
    }

    async fn rewrite(&self, existing: &str, instruction: &str) -> Generated {
        match self.complete(&rewrite_prompt(existing, instruction)).await {
            Ok(text) => Generated::ok(text),
            Err(e) => {
                warn!(error = %e, "Rewrite degraded; keeping existing content");
                Generated::fallback(existing.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AiConfig;

    #[test]
    fn test_draft_prompt_embeds_title() {
        let prompt = draft_prompt("Market Overview");
        assert!(prompt.contains("Market Overview"));
    }

    #[test]
    fn test_rewrite_prompt_embeds_text_and_instruction() {
        let prompt = rewrite_prompt("old text", "make it formal");
        assert!(prompt.contains("old text"));
        assert!(prompt.contains("make it formal"));
        // Original text must come before the instruction.
        assert!(prompt.find("old text").unwrap() < prompt.find("make it formal").unwrap());
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{
            "candidates": [
                {
                    "content": {
                        "parts": [ { "text": "Hello " }, { "text": "world" } ],
                        "role": "model"
                    },
                    "finishReason": "STOP"
                }
            ]
        }"#;

        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.into_text().unwrap(), "Hello world");
    }

    #[test]
    fn test_response_parsing_empty() {
        let parsed: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(matches!(
            parsed.into_text(),
            Err(GeminiError::EmptyResponse)
        ));

        let parsed: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.into_text().is_err());
    }

    #[test]
    fn test_error_envelope_parsing() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        let envelope: ErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.error.code, Some(429));
        assert_eq!(envelope.error.message, "Quota exceeded");
    }

    #[tokio::test]
    async fn test_draft_degrades_without_api_key() {
        let generator = GeminiGenerator::new(&AiConfig {
            api_key: None,
            model: "gemini-pro".to_string(),
        });

        let result = generator.draft("Intro").await;
        assert!(result.degraded);
        assert!(result.text.contains("Intro"));
    }

    #[tokio::test]
    async fn test_rewrite_keeps_existing_text_without_api_key() {
        let generator = GeminiGenerator::new(&AiConfig {
            api_key: None,
            model: "gemini-pro".to_string(),
        });

        let result = generator.rewrite("the original text", "shorten it").await;
        assert!(result.degraded);
        assert_eq!(result.text, "the original text");
    }
}
