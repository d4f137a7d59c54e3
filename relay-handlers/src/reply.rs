//! Outbound send with the relay's failure policy: log, ERROR alert, no retry.

use relay_core::{AlertLevel, AlertSink, Bot, HandlerResponse, Message};
use tracing::{error, info};

/// Sends `text` to the message's chat. Returns `Reply(text)` on success and `Stop` on failure;
/// a failed send counts as handled.
pub(crate) async fn send_or_alert(
    bot: &dyn Bot,
    alerts: &dyn AlertSink,
    message: &Message,
    text: &str,
) -> HandlerResponse {
    match bot.send_message(&message.chat, text).await {
        Ok(()) => {
            info!(
                platform = %message.platform,
                user_id = message.user.id,
                chat_id = message.chat.id,
                "Сообщение отправлено пользователю"
            );
            HandlerResponse::Reply(text.to_string())
        }
        Err(e) => {
            let body = format!(
                "Ошибка отправки сообщения пользователю {}: {}",
                message.user.id, e
            );
            error!(platform = %message.platform, chat_id = message.chat.id, error = %e, "{}", body);
            alerts
                .notify(AlertLevel::Error, message.platform.display_name(), &body)
                .await;
            HandlerResponse::Stop
        }
    }
}
