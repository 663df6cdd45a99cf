#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use lifegarden::advisor::{AdvisorError, GenerateRequest, LanguageModel};
use lifegarden::garden::store::HabitStore;
use lifegarden::storage::MemoryStore;

/// Calendar day in a fixed test month.
pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

/// A habit store over a fresh in-memory adapter, with no starter habits.
pub fn empty_garden() -> (Arc<MemoryStore>, HabitStore) {
    let kv = Arc::new(MemoryStore::new());
    let store = HabitStore::load_empty(kv.clone());
    (kv, store)
}

/// A [`LanguageModel`] double that counts calls, records requests, and
/// answers with a fixed reply after an optional delay.
pub struct ScriptedModel {
    reply: Result<String, String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedModel {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            delay: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn slow(text: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            delay: Some(delay),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            delay: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Text of the last user turn sent to the model.
    pub fn last_prompt(&self) -> Option<String> {
        let requests = self.requests.lock().unwrap();
        requests
            .last()
            .and_then(|r| r.contents.last())
            .map(|m| m.text.clone())
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, request: GenerateRequest) -> Result<String, AdvisorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.reply.clone().map_err(|message| AdvisorError::Api {
            status: 503,
            message,
        })
    }
}
