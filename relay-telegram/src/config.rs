//! Telegram token and optional Bot API URL.

use std::env;

use anyhow::Result;
use tracing::debug;

#[derive(Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
}

impl TelegramConfig {
    /// Reads `TELEGRAM_BOT_TOKEN` (required) and `TELEGRAM_API_URL` (must be a valid URL if set).
    pub fn from_lookup<F>(lookup: F) -> std::result::Result<Self, Vec<String>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut problems = Vec::new();
        let bot_token = lookup("TELEGRAM_BOT_TOKEN").filter(|v| !v.trim().is_empty());
        if bot_token.is_none() {
            problems.push("TELEGRAM_BOT_TOKEN не найден в переменных окружения!".to_string());
        }
        let telegram_api_url = lookup("TELEGRAM_API_URL").filter(|v| !v.trim().is_empty());
        if let Some(url) = &telegram_api_url {
            if reqwest::Url::parse(url).is_err() {
                problems.push(format!("TELEGRAM_API_URL некорректен: {}", url));
            }
        }
        match bot_token {
            Some(bot_token) if problems.is_empty() => Ok(Self {
                bot_token,
                telegram_api_url,
            }),
            _ => Err(problems),
        }
    }

    pub fn from_env() -> std::result::Result<Self, Vec<String>> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Uses the given token and the default API URL.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
        }
    }

    /// Builds the teloxide Bot, pointed at `telegram_api_url` when set.
    pub fn build_bot(&self) -> Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match &self.telegram_api_url {
            Some(url_str) => {
                let url = reqwest::Url::parse(url_str)?;
                debug!(url = %url, "Using custom Telegram API URL");
                Ok(bot.set_api_url(url))
            }
            None => Ok(bot),
        }
    }
}
