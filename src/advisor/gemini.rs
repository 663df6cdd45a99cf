//! Generative Language REST backend.
//!
//! Sends one non-streaming `generateContent` call per request, authenticated
//! with an API key header, and concatenates the text parts of the first
//! candidate.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{AdvisorError, GenerateRequest, LanguageModel};
use crate::config::AdvisorConfig;
use crate::garden::types::ChatMessage;

/// Gemini-backed [`LanguageModel`].
pub struct GeminiModel {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

/// Google error wrapper.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: GoogleError,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    code: Option<u16>,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GeminiModel {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self::with_client(reqwest::Client::new(), api_key, model, base_url)
    }

    /// Use a preconfigured HTTP client (proxy, timeouts, test settings).
    pub fn with_client(
        client: reqwest::Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    /// `None` when the config carries no usable credential.
    pub fn from_config(config: &AdvisorConfig) -> Option<Self> {
        let key = config.credential()?;
        Some(Self::new(key, &config.model, &config.base_url))
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl LanguageModel for GeminiModel {
    async fn generate(&self, request: GenerateRequest) -> Result<String, AdvisorError> {
        let body = build_request_body(&request);
        tracing::debug!(model = %self.model, turns = request.contents.len(), "generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .header(CONTENT_TYPE, "application/json")
            .header("x-goog-api-key", &self.api_key)
            .body(body.to_string())
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // Try to parse as Google error
            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&text) {
                return Err(AdvisorError::Api {
                    status: error_response.error.code.unwrap_or(status.as_u16()),
                    message: error_response.error.message,
                });
            }
            return Err(AdvisorError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        extract_text(&text)
    }
}

/// Build the JSON body for a `generateContent` call.
pub fn build_request_body(request: &GenerateRequest) -> Value {
    let contents: Vec<Value> = request.contents.iter().map(content_json).collect();
    let mut body = json!({ "contents": contents });

    if let Some(ref system) = request.system_instruction {
        body["systemInstruction"] = json!({
            "parts": [{ "text": system }]
        });
    }

    if let Some(ref schema) = request.response_schema {
        body["generationConfig"] = json!({
            "responseMimeType": "application/json",
            "responseSchema": schema,
        });
    }

    body
}

fn content_json(message: &ChatMessage) -> Value {
    json!({
        "role": message.role.as_str(),
        "parts": [{ "text": message.text }]
    })
}

/// Pull the reply text out of a `generateContent` response body.
pub fn extract_text(body: &str) -> Result<String, AdvisorError> {
    let parsed: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| AdvisorError::Parse(e.to_string()))?;

    if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(AdvisorError::Blocked(reason));
    }

    let candidate = parsed
        .candidates
        .into_iter()
        .next()
        .ok_or(AdvisorError::EmptyResponse)?;

    if candidate.finish_reason.as_deref() == Some("SAFETY") {
        return Err(AdvisorError::Blocked("SAFETY".into()));
    }

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AdvisorError::EmptyResponse);
    }
    Ok(text)
}
