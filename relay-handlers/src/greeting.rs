//! Greeting detection and the static welcome reply.

use std::sync::Arc;

use async_trait::async_trait;
use relay_core::{AlertSink, Bot, Handler, HandlerResponse, Message, Platform, Result};
use tracing::{info, instrument};

use crate::reply::send_or_alert;

/// Literals that trigger the welcome message (compared after trim + lowercase).
pub const DEFAULT_GREETINGS: &[&str] = &["/start", "start", "начать", "старт", "привет"];

pub const WELCOME_TEXT: &str = "Привет! Я умный бот с интеграцией Dialogflow. \
Задайте мне любой вопрос! Если я не смогу помочь, вам ответит оператор техподдержки.";

/// True when `text` is one of `greetings`. A Telegram `/command@botname` suffix is ignored.
pub fn is_greeting(text: &str, greetings: &[String]) -> bool {
    let normalized = text.trim().to_lowercase();
    let normalized = match normalized.split_once('@') {
        Some((command, _bot)) if command.starts_with('/') => command.to_string(),
        _ => normalized,
    };
    greetings.iter().any(|g| g.trim().to_lowercase() == normalized)
}

/// True for Telegram bot commands (`/help`, `/settings@bot`).
pub fn is_command(text: &str) -> bool {
    text.trim_start().starts_with('/')
}

/// Replies with the welcome text to greetings and stops the chain.
///
/// Other Telegram commands stop the chain silently; any other text continues.
pub struct GreetingHandler {
    bot: Arc<dyn Bot>,
    alerts: Arc<dyn AlertSink>,
    greetings: Vec<String>,
}

impl GreetingHandler {
    /// Uses [`DEFAULT_GREETINGS`] and [`WELCOME_TEXT`].
    pub fn new(bot: Arc<dyn Bot>, alerts: Arc<dyn AlertSink>) -> Self {
        Self {
            bot,
            alerts,
            greetings: DEFAULT_GREETINGS.iter().map(|g| g.to_string()).collect(),
        }
    }

    /// Replaces the greeting literals.
    pub fn with_greetings(mut self, greetings: Vec<String>) -> Self {
        self.greetings = greetings;
        self
    }
}

#[async_trait]
impl Handler for GreetingHandler {
    #[instrument(skip(self, message), fields(platform = %message.platform, user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !is_greeting(&message.content, &self.greetings) {
            if message.platform == Platform::Telegram && is_command(&message.content) {
                info!(command = %message.content.trim(), "Skipping unsupported command");
                return Ok(HandlerResponse::Stop);
            }
            return Ok(HandlerResponse::Continue);
        }
        info!(user_id = message.user.id, "Greeting received, sending welcome message");
        Ok(send_or_alert(
            self.bot.as_ref(),
            self.alerts.as_ref(),
            message,
            WELCOME_TEXT,
        )
        .await)
    }
}
