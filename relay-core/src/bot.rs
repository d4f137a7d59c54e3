//! Bot abstraction for sending replies.
//!
//! [`Bot`] is transport-agnostic; relay-telegram and relay-vk implement it.

use crate::error::Result;
use crate::types::Chat;
use async_trait::async_trait;

/// Abstraction for sending messages. Implementations map to a transport (Telegram, VK).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
}
