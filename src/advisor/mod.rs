//! AI advisory service — habit suggestions, daily wisdom, and coaching chat.
//!
//! [`Advisor`] is chosen once at startup: [`Advisor::Live`] wraps a
//! [`LanguageModel`] backend, [`Advisor::Disabled`] is used when no credential
//! is configured. Both expose the same three operations, and none of them
//! return an error: every failure (missing credential, network, quota,
//! unparseable output, empty reply) becomes a fixed fallback value here.

pub mod gemini;
pub mod prompts;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AdvisorConfig;
use crate::garden::types::{Area, ChatMessage};

/// Returned by [`Advisor::daily_wisdom`] when the model cannot answer.
pub const WISDOM_FALLBACK: &str = "Your garden grows with patience and love.";

/// Returned by [`Advisor::chat_with_coach`] when the model cannot answer.
pub const COACH_FALLBACK: &str =
    "The wind is blowing too hard, I cannot hear you clearly right now. Please try again later.";

/// A habit proposed by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitSuggestion {
    pub title: String,
    pub description: String,
    pub area: Area,
    pub emoji: String,
}

/// Failures inside the advisor boundary. Never returned to callers of [`Advisor`].
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// No credential is configured for the backing service.
    #[error("advisor is not configured")]
    NotConfigured,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The prompt or response was blocked by the provider.
    #[error("blocked: {0}")]
    Blocked(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("model returned an empty response")]
    EmptyResponse,
}

/// One generation call: optional system instruction, ordered turns, and an
/// optional JSON schema the reply must follow.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub system_instruction: Option<String>,
    pub contents: Vec<ChatMessage>,
    pub response_schema: Option<serde_json::Value>,
}

impl GenerateRequest {
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            contents: vec![ChatMessage::user(text)],
            ..Self::default()
        }
    }
}

/// A generative language backend.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Run one generation and return the reply text.
    async fn generate(&self, request: GenerateRequest) -> Result<String, AdvisorError>;
}

#[derive(Clone)]
pub enum Advisor {
    Live(Arc<dyn LanguageModel>),
    Disabled,
}

impl std::fmt::Debug for Advisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live(_) => f.write_str("Advisor::Live"),
            Self::Disabled => f.write_str("Advisor::Disabled"),
        }
    }
}

impl Advisor {
    /// Pick the live Gemini backend if a credential is configured, otherwise
    /// the disabled variant.
    pub fn from_config(config: &AdvisorConfig) -> Self {
        match gemini::GeminiModel::from_config(config) {
            Some(model) => {
                tracing::info!(model = %config.model, "advisor enabled");
                Self::Live(Arc::new(model))
            }
            None => {
                tracing::warn!("no advisor API key configured; AI features will use fallbacks");
                Self::Disabled
            }
        }
    }

    pub fn live(model: Arc<dyn LanguageModel>) -> Self {
        Self::Live(model)
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    /// Suggest habits for `goal`. Empty on any failure.
    pub async fn suggest_habits(
        &self,
        goal: &str,
        existing_titles: &[String],
    ) -> Vec<HabitSuggestion> {
        let request = GenerateRequest {
            response_schema: Some(prompts::suggestion_schema()),
            ..GenerateRequest::prompt(prompts::suggestion_prompt(goal, existing_titles))
        };

        let result = self.request(request).await;
        match result.and_then(|text| parse_suggestions(&text)) {
            Ok(suggestions) => {
                tracing::info!(count = suggestions.len(), "habit suggestions received");
                suggestions
            }
            Err(e) => {
                log_fallback("suggest_habits", &e);
                Vec::new()
            }
        }
    }

    /// A short poetic message about today's progress. [`WISDOM_FALLBACK`] on failure.
    pub async fn daily_wisdom(&self, completed: usize, areas: &[Area]) -> String {
        let request = GenerateRequest::prompt(prompts::wisdom_prompt(completed, areas));
        match self.request(request).await {
            Ok(text) => text,
            Err(e) => {
                log_fallback("daily_wisdom", &e);
                WISDOM_FALLBACK.to_string()
            }
        }
    }

    /// Continue a coaching conversation. `history` holds the turns before
    /// `message`. [`COACH_FALLBACK`] on failure.
    pub async fn chat_with_coach(&self, history: &[ChatMessage], message: &str) -> String {
        let mut contents = history.to_vec();
        contents.push(ChatMessage::user(message));
        let request = GenerateRequest {
            system_instruction: Some(prompts::COACH_PERSONA.to_string()),
            contents,
            response_schema: None,
        };
        match self.request(request).await {
            Ok(text) => text,
            Err(e) => {
                log_fallback("chat_with_coach", &e);
                COACH_FALLBACK.to_string()
            }
        }
    }

    /// Dispatch to the backend. Blank replies count as failures.
    async fn request(&self, request: GenerateRequest) -> Result<String, AdvisorError> {
        let model = match self {
            Self::Live(model) => model,
            Self::Disabled => return Err(AdvisorError::NotConfigured),
        };
        let text = model.generate(request).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(AdvisorError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}

/// Decode the structured suggestion list. Any deviation from the schema fails
/// the whole batch.
pub fn parse_suggestions(text: &str) -> Result<Vec<HabitSuggestion>, AdvisorError> {
    let suggestions: Vec<HabitSuggestion> =
        serde_json::from_str(text.trim()).map_err(|e| AdvisorError::Parse(e.to_string()))?;
    Ok(suggestions
        .into_iter()
        .filter(|s| !s.title.trim().is_empty())
        .collect())
}

fn log_fallback(operation: &str, err: &AdvisorError) {
    match err {
        AdvisorError::NotConfigured => {
            tracing::debug!(operation, "advisor disabled, using fallback")
        }
        _ => tracing::warn!(operation, error = %err, "advisor call failed, using fallback"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Replies with a fixed result and records every request.
    struct Canned {
        reply: Result<String, String>,
        seen: Mutex<Vec<GenerateRequest>>,
    }

    impl Canned {
        fn ok(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.into()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err("quota exceeded".into()),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LanguageModel for Canned {
        async fn generate(&self, request: GenerateRequest) -> Result<String, AdvisorError> {
            self.seen.lock().unwrap().push(request);
            self.reply.clone().map_err(|message| AdvisorError::Api {
                status: 429,
                message,
            })
        }
    }

    #[tokio::test]
    async fn disabled_advisor_returns_fallbacks() {
        let advisor = Advisor::Disabled;
        assert!(advisor.suggest_habits("save money", &[]).await.is_empty());
        assert_eq!(advisor.daily_wisdom(0, &[]).await, WISDOM_FALLBACK);
        assert_eq!(advisor.chat_with_coach(&[], "hi").await, COACH_FALLBACK);
    }

    #[test]
    fn config_without_key_is_disabled() {
        let advisor = Advisor::from_config(&AdvisorConfig::default());
        assert!(!advisor.is_enabled());
    }

    #[tokio::test]
    async fn malformed_suggestions_yield_empty_list() {
        let advisor = Advisor::live(Canned::ok(r#"[{"title":"Walk","area":"Health"}]"#));
        assert!(advisor.suggest_habits("move more", &[]).await.is_empty());

        let advisor = Advisor::live(Canned::ok("here are some ideas!"));
        assert!(advisor.suggest_habits("move more", &[]).await.is_empty());
    }

    #[tokio::test]
    async fn suggestion_with_unknown_area_fails_batch() {
        let advisor = Advisor::live(Canned::ok(
            r#"[{"title":"Nap","description":"Rest.","area":"Leisure","emoji":"😴"}]"#,
        ));
        assert!(advisor.suggest_habits("rest", &[]).await.is_empty());
    }

    #[tokio::test]
    async fn valid_suggestions_are_parsed_with_schema_attached() {
        let model = Canned::ok(
            r#"[{"title":"Morning Tea","description":"Sip slowly.","area":"Spirituality","emoji":"🍵"},
                {"title":"Coin Jar","description":"Drop in spare change.","area":"Finances","emoji":"🪙"}]"#,
        );
        let advisor = Advisor::live(model.clone());
        let suggestions = advisor
            .suggest_habits("slow down", &["Walk".to_string()])
            .await;
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[1].area, Area::Finances);

        let seen = model.seen.lock().unwrap();
        assert!(seen[0].response_schema.is_some());
        assert!(seen[0].contents[0].text.contains("Walk"));
    }

    #[tokio::test]
    async fn failures_and_blank_replies_use_fallbacks() {
        let advisor = Advisor::live(Canned::failing());
        assert_eq!(advisor.daily_wisdom(3, &[Area::Health]).await, WISDOM_FALLBACK);
        assert_eq!(advisor.chat_with_coach(&[], "hello").await, COACH_FALLBACK);

        let advisor = Advisor::live(Canned::ok("   \n"));
        assert_eq!(advisor.daily_wisdom(1, &[]).await, WISDOM_FALLBACK);
        assert_eq!(advisor.chat_with_coach(&[], "hello").await, COACH_FALLBACK);
    }

    #[tokio::test]
    async fn chat_sends_history_then_message_with_persona() {
        let model = Canned::ok("Water the roots first, dear.");
        let advisor = Advisor::live(model.clone());
        let history = vec![ChatMessage::model("Hello dear."), ChatMessage::user("I'm tired")];

        let reply = advisor.chat_with_coach(&history, "what now?").await;
        assert_eq!(reply, "Water the roots first, dear.");

        let seen = model.seen.lock().unwrap();
        let request = &seen[0];
        assert_eq!(request.system_instruction.as_deref(), Some(prompts::COACH_PERSONA));
        assert_eq!(request.contents.len(), 3);
        assert_eq!(request.contents[2], ChatMessage::user("what now?"));
    }
}
