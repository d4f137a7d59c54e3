//! [`relay_core::Bot`] over `messages.send`.

use async_trait::async_trait;
use relay_core::{Bot, Chat, RelayError, Result};
use tracing::debug;

use crate::api::VkApiClient;

/// Sends replies to the chat's peer id.
pub struct VkBot {
    api: VkApiClient,
}

impl VkBot {
    pub fn new(api: VkApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Bot for VkBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        let message_id = self
            .api
            .send_message(chat.id, text)
            .await
            .map_err(|e| RelayError::Bot(format!("{:#}", e)))?;
        debug!(peer_id = chat.id, message_id, "VK message sent");
        Ok(())
    }
}
