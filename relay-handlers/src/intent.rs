//! Forwards ordinary text to the intent backend and relays matched answers.

use std::sync::Arc;

use async_trait::async_trait;
use intent_client::IntentQueryClient;
use relay_core::{derive_session_id, AlertSink, Bot, Handler, HandlerResponse, Message, Result};
use tracing::{info, instrument};

use crate::reply::send_or_alert;

/// Terminal handler: queries the intent backend with the user's session id.
///
/// Fallback results (including the apology returned on backend errors) are not sent;
/// a matched answer is sent exactly once.
pub struct IntentHandler {
    bot: Arc<dyn Bot>,
    intents: IntentQueryClient,
    alerts: Arc<dyn AlertSink>,
}

impl IntentHandler {
    pub fn new(bot: Arc<dyn Bot>, intents: IntentQueryClient, alerts: Arc<dyn AlertSink>) -> Self {
        Self {
            bot,
            intents,
            alerts,
        }
    }
}

#[async_trait]
impl Handler for IntentHandler {
    #[instrument(skip(self, message), fields(platform = %message.platform, user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let session_id = derive_session_id(message.platform, message.user.id);
        info!(session_id = %session_id, "step: intent query");
        let result = self.intents.query(&message.content, &session_id).await;

        if result.is_fallback {
            info!(
                user_id = message.user.id,
                "Fallback-интент обнаружен для пользователя {}. Сообщение не отправляется.",
                message.user.id
            );
            return Ok(HandlerResponse::Stop);
        }

        Ok(send_or_alert(
            self.bot.as_ref(),
            self.alerts.as_ref(),
            message,
            &result.reply_text,
        )
        .await)
    }
}
