//! `getUpdates` long-poll as an [`EventSource`].

use async_trait::async_trait;
use relay_core::{EventSource, Message, Platform, RelayError, Result};
use teloxide::prelude::*;
use teloxide::types::UpdateKind;
use tracing::{debug, info};

use crate::adapters::to_core_message;

/// Server-side long-poll wait. Kept below teloxide's default client timeout (17s).
pub const DEFAULT_POLL_TIMEOUT_SECS: u32 = 10;

/// Long-polls Telegram for message updates, tracking the offset so each update is seen once.
pub struct TelegramUpdateSource {
    bot: teloxide::Bot,
    offset: i32,
    poll_timeout_secs: u32,
}

impl TelegramUpdateSource {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self {
            bot,
            offset: 0,
            poll_timeout_secs: DEFAULT_POLL_TIMEOUT_SECS,
        }
    }

    pub fn with_poll_timeout(mut self, secs: u32) -> Self {
        self.poll_timeout_secs = secs;
        self
    }

    /// Next offset sent to `getUpdates` (last update id + 1).
    pub fn offset(&self) -> i32 {
        self.offset
    }
}

#[async_trait]
impl EventSource for TelegramUpdateSource {
    fn platform(&self) -> Platform {
        Platform::Telegram
    }

    async fn next_batch(&mut self) -> Result<Vec<Message>> {
        let updates = self
            .bot
            .get_updates()
            .offset(self.offset)
            .timeout(self.poll_timeout_secs)
            .await
            .map_err(|e| RelayError::Source(format!("Telegram getUpdates: {}", e)))?;

        let mut batch = Vec::with_capacity(updates.len());
        for update in updates {
            self.offset = update.id.as_offset();
            let UpdateKind::Message(msg) = &update.kind else {
                continue;
            };
            match to_core_message(msg) {
                Ok(message) => {
                    info!(
                        user_id = message.user.id,
                        chat_id = message.chat.id,
                        "Получено сообщение"
                    );
                    batch.push(message);
                }
                Err(e) => debug!(chat_id = msg.chat.id.0, reason = %e, "Skipping non-text message"),
            }
        }
        Ok(batch)
    }
}
