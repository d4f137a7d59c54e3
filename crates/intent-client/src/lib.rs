//! # Intent client
//!
//! [`IntentQueryClient::query`] turns user text into an [`IntentResult`] and never fails:
//! any backend error becomes the fixed apology with `is_fallback = true` plus one ERROR alert.
//! The backend is behind [`IntentBackend`]; [`DialogflowBackend`] is the production one.
//! Dialogflow's own response types stay inside this crate.

use anyhow::Result;
use async_trait::async_trait;
use relay_core::{AlertLevel, AlertSink};
use std::sync::Arc;
use tracing::{error, info, instrument};

mod config;
mod dialogflow_backend;

pub use config::{DialogflowConfig, DEFAULT_LANGUAGE_CODE};
pub use dialogflow_backend::DialogflowBackend;

/// Reply returned when the backend cannot be reached. Never shown to users: it carries `is_fallback = true`.
pub const APOLOGY_TEXT: &str = "Извините, произошла ошибка при обработке запроса.";

/// Matched reply and whether the backend fell back (no confident intent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentResult {
    pub reply_text: String,
    pub is_fallback: bool,
}

impl IntentResult {
    pub fn matched(reply_text: impl Into<String>) -> Self {
        Self {
            reply_text: reply_text.into(),
            is_fallback: false,
        }
    }

    pub fn fallback(reply_text: impl Into<String>) -> Self {
        Self {
            reply_text: reply_text.into(),
            is_fallback: true,
        }
    }

    pub fn apology() -> Self {
        Self::fallback(APOLOGY_TEXT)
    }
}

/// Intent-detection backend. Errors are handled by [`IntentQueryClient`].
#[async_trait]
pub trait IntentBackend: Send + Sync {
    async fn detect_intent(
        &self,
        text: &str,
        session_id: &str,
        language_code: &str,
    ) -> Result<IntentResult>;
}

/// Infallible façade over an [`IntentBackend`]; one per adapter so alerts carry the adapter's name.
#[derive(Clone)]
pub struct IntentQueryClient {
    backend: Arc<dyn IntentBackend>,
    alerts: Arc<dyn AlertSink>,
    language_code: String,
    source_name: String,
}

impl IntentQueryClient {
    pub fn new(backend: Arc<dyn IntentBackend>, alerts: Arc<dyn AlertSink>) -> Self {
        Self {
            backend,
            alerts,
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            source_name: "Bot".to_string(),
        }
    }

    pub fn with_language_code(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = language_code.into();
        self
    }

    /// Name shown in alerts (e.g. "VK Bot").
    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = source_name.into();
        self
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    /// Queries with the configured language code.
    pub async fn query(&self, text: &str, session_id: &str) -> IntentResult {
        self.query_with_language(text, session_id, &self.language_code)
            .await
    }

    /// Text is forwarded as-is, including empty or whitespace-only input.
    #[instrument(skip(self, text))]
    pub async fn query_with_language(
        &self,
        text: &str,
        session_id: &str,
        language_code: &str,
    ) -> IntentResult {
        info!(session_id = %session_id, "Dialogflow request");
        match self
            .backend
            .detect_intent(text, session_id, language_code)
            .await
        {
            Ok(result) => {
                info!(
                    session_id = %session_id,
                    reply = %result.reply_text,
                    is_fallback = result.is_fallback,
                    "Dialogflow response"
                );
                result
            }
            Err(e) => {
                let body = format!("Ошибка Dialogflow: {:#}", e);
                error!(session_id = %session_id, error = %body, "Dialogflow query failed");
                self.alerts
                    .notify(AlertLevel::Error, &self.source_name, &body)
                    .await;
                IntentResult::apology()
            }
        }
    }
}
