//! Test doubles: a recording [`Bot`], a recording [`AlertSink`] and a scripted [`IntentBackend`].

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use intent_client::{IntentBackend, IntentResult};
use relay_core::{
    AlertLevel, AlertSink, Bot, Chat, Message, Platform, RelayError, Result, User,
};

/// One recorded `send_message(chat, text)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentRecord {
    pub chat_id: i64,
    pub text: String,
}

/// Bot that records every send; fails every send when `failing` is set.
#[derive(Default)]
pub struct MockBot {
    pub sent: Mutex<Vec<SentRecord>>,
    failing: AtomicBool,
}

impl MockBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let bot = Self::default();
        bot.failing.store(true, Ordering::SeqCst);
        Arc::new(bot)
    }

    pub fn sent(&self) -> Vec<SentRecord> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RelayError::Bot("Forbidden: bot was blocked by the user".to_string()));
        }
        self.sent.lock().unwrap().push(SentRecord {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }
}

/// Alert sink that keeps every alert.
#[derive(Default)]
pub struct RecordingAlerts {
    pub alerts: Mutex<Vec<(AlertLevel, String, String)>>,
}

impl RecordingAlerts {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn alerts(&self) -> Vec<(AlertLevel, String, String)> {
        self.alerts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlertSink for RecordingAlerts {
    async fn notify(&self, level: AlertLevel, source_name: &str, body: &str) {
        self.alerts
            .lock()
            .unwrap()
            .push((level, source_name.to_string(), body.to_string()));
    }
}

/// Backend answering from a text → result table; unknown text is a fallback.
/// Text mapped to `Err` simulates a backend failure.
#[derive(Default)]
pub struct ScriptedBackend {
    answers: HashMap<String, std::result::Result<IntentResult, String>>,
    pub calls: AtomicUsize,
    pub sessions: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, text: &str, reply: &str) -> Self {
        self.answers
            .insert(text.to_string(), Ok(IntentResult::matched(reply)));
        self
    }

    pub fn fail(mut self, text: &str, error: &str) -> Self {
        self.answers.insert(text.to_string(), Err(error.to_string()));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IntentBackend for ScriptedBackend {
    async fn detect_intent(
        &self,
        text: &str,
        session_id: &str,
        _language_code: &str,
    ) -> anyhow::Result<IntentResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sessions.lock().unwrap().push(session_id.to_string());
        match self.answers.get(text) {
            Some(Ok(result)) => Ok(result.clone()),
            Some(Err(e)) => Err(anyhow::anyhow!("{}", e)),
            None => Ok(IntentResult::fallback("Я вас не понял")),
        }
    }
}

pub fn text_message(platform: Platform, user_id: i64, content: &str) -> Message {
    Message {
        id: format!("{}-msg", user_id),
        platform,
        user: User {
            id: user_id,
            username: Some("client".to_string()),
            first_name: Some("Client".to_string()),
        },
        chat: Chat {
            id: user_id,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        created_at: Utc::now(),
    }
}
