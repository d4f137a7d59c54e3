//! Logs each inbound message and the final response.

use async_trait::async_trait;
use relay_core::{Handler, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument};

/// Logs each message in before() and the response in after(); always continues.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            platform = %message.platform,
            user_id = message.user.id,
            chat_id = message.chat.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            message_content = %message.content,
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        debug!(
            message_id = ?message.id,
            response = ?response,
            "Processed message"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use relay_core::{Chat, Platform, User};

    fn sample_message(content: &str) -> Message {
        Message {
            id: "msg-1".to_string(),
            platform: Platform::Vk,
            user: User {
                id: 1,
                username: None,
                first_name: Some("Test".to_string()),
            },
            chat: Chat {
                id: 1,
                chat_type: "user".to_string(),
            },
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_logging_handler_before_continues() {
        assert!(LoggingHandler.before(&sample_message("hello")).await.unwrap());
    }

    #[tokio::test]
    async fn test_logging_handler_after_ok() {
        let response = HandlerResponse::Reply("hi".to_string());
        assert!(LoggingHandler
            .after(&sample_message("hello"), &response)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_logging_handler_handle_passes_through() {
        assert_eq!(
            LoggingHandler.handle(&sample_message("hello")).await.unwrap(),
            HandlerResponse::Continue
        );
    }
}
