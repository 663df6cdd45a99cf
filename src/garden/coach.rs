//! Coaching chat session. History lives only in memory and only grows.

use super::types::ChatMessage;
use crate::advisor::Advisor;

/// The coach's opening line.
pub const COACH_GREETING: &str =
    "Hello dear. I'm Sage. How can I help you tend to your life garden today?";

#[derive(Debug, Clone)]
pub struct ChatSession {
    history: Vec<ChatMessage>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            history: vec![ChatMessage::model(COACH_GREETING)],
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Send `text` to the coach and append both turns. Blank input is ignored
    /// and returns `None`.
    pub async fn send(&mut self, advisor: &Advisor, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let prior = self.history.clone();
        self.history.push(ChatMessage::user(text));
        let reply = advisor.chat_with_coach(&prior, text).await;
        self.history.push(ChatMessage::model(reply.clone()));
        Some(reply)
    }
}
