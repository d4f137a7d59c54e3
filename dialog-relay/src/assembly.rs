//! Assembly: builds the per-adapter intent client and handler chain. Used by the [facade](crate::facade).

use std::sync::Arc;

use handler_chain::HandlerChain;
use intent_client::{IntentBackend, IntentQueryClient};
use relay_core::{AlertSink, Bot, Platform};
use relay_handlers::{GreetingHandler, IntentHandler, LoggingHandler};

use crate::config::RelayConfig;

/// Intent client whose alerts are attributed to `platform`.
pub(crate) fn build_intent_client(
    config: &RelayConfig,
    platform: Platform,
    backend: Arc<dyn IntentBackend>,
    alerts: Arc<dyn AlertSink>,
) -> IntentQueryClient {
    IntentQueryClient::new(backend, alerts)
        .with_language_code(config.dialogflow.language_code.clone())
        .with_source_name(platform.display_name())
}

/// Logging → greeting → intent.
pub fn build_chain(
    config: &RelayConfig,
    platform: Platform,
    bot: Arc<dyn Bot>,
    backend: Arc<dyn IntentBackend>,
    alerts: Arc<dyn AlertSink>,
) -> HandlerChain {
    let intents = build_intent_client(config, platform, backend, alerts.clone());
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(
            GreetingHandler::new(bot.clone(), alerts.clone())
                .with_greetings(config.greetings.clone()),
        ))
        .add_handler(Arc::new(IntentHandler::new(bot, intents, alerts)))
}
