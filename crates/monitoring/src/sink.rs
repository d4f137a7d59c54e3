//! Telegram-backed [`AlertSink`]: one POST per alert, no retry, failures logged and swallowed.

use anyhow::{bail, Context};
use async_trait::async_trait;
use relay_core::{AlertLevel, AlertSink};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{error, info, instrument, warn};

use crate::config::MonitoringConfig;

pub const ALERT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct SendMessagePayload<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Alert text as sent to the admin chat. The body is HTML-escaped; the message uses parse_mode HTML.
pub fn format_alert(level: AlertLevel, source_name: &str, body: &str) -> String {
    format!(
        "{} Alert - {}\n\n{}",
        level,
        escape_html(source_name),
        escape_html(body)
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Posts alerts to `{api_url}/bot{token}/sendMessage`. With no config every call is a no-op.
pub struct TelegramAlertSink {
    client: reqwest::Client,
    config: Option<MonitoringConfig>,
    warned_missing_config: AtomicBool,
}

impl TelegramAlertSink {
    pub fn new(config: Option<MonitoringConfig>) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: Option<MonitoringConfig>) -> Self {
        Self {
            client,
            config,
            warned_missing_config: AtomicBool::new(false),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    async fn deliver(
        &self,
        config: &MonitoringConfig,
        level: AlertLevel,
        source_name: &str,
        body: &str,
    ) -> anyhow::Result<()> {
        let text = format_alert(level, source_name, body);
        let payload = SendMessagePayload {
            chat_id: &config.admin_chat_id,
            text: &text,
            parse_mode: "HTML",
        };
        let response = self
            .client
            .post(config.send_message_url())
            .timeout(ALERT_TIMEOUT)
            .json(&payload)
            .send()
            .await
            .context("alert request failed")?;

        let status = response.status();
        if !status.is_success() {
            let content = response.text().await.unwrap_or_default();
            bail!("monitoring bot returned {}: {}", status, content);
        }
        Ok(())
    }
}

#[async_trait]
impl AlertSink for TelegramAlertSink {
    #[instrument(skip(self, body))]
    async fn notify(&self, level: AlertLevel, source_name: &str, body: &str) {
        let Some(config) = self.config.as_ref() else {
            if !self.warned_missing_config.swap(true, Ordering::Relaxed) {
                warn!("Monitoring bot token or admin chat ID not set; alerts are disabled");
            }
            return;
        };

        match self.deliver(config, level, source_name, body).await {
            Ok(()) => info!(level = %level, "Alert sent to monitoring bot"),
            Err(e) => error!(error = %format!("{:#}", e), "Failed to send alert to monitoring bot"),
        }
    }
}
