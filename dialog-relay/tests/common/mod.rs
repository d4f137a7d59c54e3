//! Test doubles for driving the assembled chain without Telegram, VK or Dialogflow.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use intent_client::{IntentBackend, IntentResult};
use relay_core::{
    AlertLevel, AlertSink, Bot, Chat, EventSource, Message, Platform, RelayError, Result, User,
};

#[derive(Default)]
pub struct MockBot {
    pub sent: Mutex<Vec<(i64, String)>>,
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push((chat.id, text.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingAlerts {
    pub alerts: Mutex<Vec<(AlertLevel, String, String)>>,
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

/// Answers "Как сделать возврат?" and falls back on everything else.
pub struct RefundBackend;

#[async_trait]
impl IntentBackend for RefundBackend {
    async fn detect_intent(
        &self,
        text: &str,
        _session_id: &str,
        _language_code: &str,
    ) -> anyhow::Result<IntentResult> {
        if text == "Как сделать возврат?" {
            Ok(IntentResult::matched("Возврат оформляется в личном кабинете."))
        } else {
            Ok(IntentResult::fallback("Не понял вопрос"))
        }
    }
}

/// Plays back a fixed script of batches and failures, then fails forever.
pub struct ScriptedSource {
    pub platform: Platform,
    pub script: VecDeque<std::result::Result<Vec<Message>, String>>,
    pub calls: Arc<Mutex<usize>>,
}

#[async_trait]
impl EventSource for ScriptedSource {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn next_batch(&mut self) -> Result<Vec<Message>> {
        *self.calls.lock().unwrap() += 1;
        match self.script.pop_front() {
            Some(Ok(batch)) => Ok(batch),
            Some(Err(e)) => Err(RelayError::Source(e)),
            None => Err(RelayError::Source("script exhausted".to_string())),
        }
    }
}

pub fn text_message(platform: Platform, user_id: i64, content: &str) -> Message {
    Message {
        id: format!("m-{}", user_id),
        platform,
        user: User {
            id: user_id,
            username: None,
            first_name: None,
        },
        chat: Chat {
            id: user_id,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        created_at: Utc::now(),
    }
}
