//! Monitoring destination: bot token and admin chat id, loaded from `MONITORING_BOT_TOKEN` and `ADMIN_CHAT_ID`.

use std::env;

pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitoringConfig {
    pub bot_token: String,
    /// Numeric id or `@channel`; sent as-is.
    pub admin_chat_id: String,
    pub api_url: String,
}

impl MonitoringConfig {
    pub fn new(bot_token: impl Into<String>, admin_chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            admin_chat_id: admin_chat_id.into(),
            api_url: DEFAULT_TELEGRAM_API_URL.to_string(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Returns `None` unless both token and chat id are set and non-empty.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let bot_token = non_empty("MONITORING_BOT_TOKEN")?;
        let admin_chat_id = non_empty("ADMIN_CHAT_ID")?;
        Some(Self::new(bot_token, admin_chat_id))
    }

    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// `{api_url}/bot{token}/sendMessage`
    pub fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.bot_token)
    }
}
