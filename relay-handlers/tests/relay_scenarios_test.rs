//! End-to-end handler chain scenarios: greeting, matched answer, fallback, backend error, send failure.

mod common;

use std::sync::Arc;

use common::{text_message, MockBot, RecordingAlerts, ScriptedBackend, SentRecord};
use handler_chain::HandlerChain;
use intent_client::{IntentQueryClient, APOLOGY_TEXT};
use relay_core::{AlertLevel, HandlerResponse, Platform};
use relay_handlers::{GreetingHandler, IntentHandler, LoggingHandler, WELCOME_TEXT};

const REFUND_ANSWER: &str = "Для возврата обратитесь в поддержку в течение 14 дней.";

struct Harness {
    bot: Arc<MockBot>,
    alerts: Arc<RecordingAlerts>,
    backend: Arc<ScriptedBackend>,
    chain: HandlerChain,
}

fn harness(bot: Arc<MockBot>, platform: Platform) -> Harness {
    let alerts = RecordingAlerts::new();
    let backend = Arc::new(
        ScriptedBackend::new()
            .answer("Как сделать возврат?", REFUND_ANSWER)
            .fail("Сколько стоит доставка?", "operation timed out"),
    );
    let intents = IntentQueryClient::new(backend.clone(), alerts.clone())
        .with_source_name(platform.display_name());
    let chain = HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(GreetingHandler::new(bot.clone(), alerts.clone())))
        .add_handler(Arc::new(IntentHandler::new(
            bot.clone(),
            intents,
            alerts.clone(),
        )));
    Harness {
        bot,
        alerts,
        backend,
        chain,
    }
}

/// **Test: "Привет" gets the welcome message and never reaches the backend.**
#[tokio::test]
async fn test_greeting_sends_welcome_without_backend_call() {
    let h = harness(MockBot::new(), Platform::Vk);

    let response = h
        .chain
        .handle(&text_message(Platform::Vk, 42, "Привет"))
        .await
        .unwrap();

    assert_eq!(response, HandlerResponse::Reply(WELCOME_TEXT.to_string()));
    assert_eq!(
        h.bot.sent(),
        vec![SentRecord {
            chat_id: 42,
            text: WELCOME_TEXT.to_string()
        }]
    );
    assert_eq!(h.backend.calls(), 0);
}

/// **Test: a matched intent is sent verbatim, exactly once, under the platform session id.**
#[tokio::test]
async fn test_matched_intent_sent_once() {
    let h = harness(MockBot::new(), Platform::Telegram);

    let response = h
        .chain
        .handle(&text_message(Platform::Telegram, 7, "Как сделать возврат?"))
        .await
        .unwrap();

    assert_eq!(response, HandlerResponse::Reply(REFUND_ANSWER.to_string()));
    assert_eq!(h.bot.sent().len(), 1);
    assert_eq!(h.bot.sent()[0].text, REFUND_ANSWER);
    assert_eq!(*h.backend.sessions.lock().unwrap(), vec!["tg-7".to_string()]);
    assert!(h.alerts.alerts().is_empty());
}

/// **Test: gibberish resolves to a fallback intent and nothing is sent.**
#[tokio::test]
async fn test_fallback_sends_nothing() {
    let h = harness(MockBot::new(), Platform::Vk);

    let response = h
        .chain
        .handle(&text_message(Platform::Vk, 42, "ывфпывп"))
        .await
        .unwrap();

    assert_eq!(response, HandlerResponse::Stop);
    assert!(h.bot.sent().is_empty());
    assert_eq!(h.backend.calls(), 1);
    assert_eq!(*h.backend.sessions.lock().unwrap(), vec!["vk-42".to_string()]);
}

/// **Test: backend timeout yields one ERROR alert and no message to the user.**
#[tokio::test]
async fn test_backend_error_alerts_once_and_sends_nothing() {
    let h = harness(MockBot::new(), Platform::Vk);

    let response = h
        .chain
        .handle(&text_message(Platform::Vk, 42, "Сколько стоит доставка?"))
        .await
        .unwrap();

    assert_eq!(response, HandlerResponse::Stop);
    assert!(h.bot.sent().is_empty());
    assert!(!h.bot.sent().iter().any(|s| s.text == APOLOGY_TEXT));
    let alerts = h.alerts.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].0, AlertLevel::Error);
    assert_eq!(alerts[0].1, "VK Bot");
    assert_eq!(alerts[0].2, "Ошибка Dialogflow: operation timed out");
}

/// **Test: a failed send is logged, alerted once, not retried; the event still counts as handled.**
#[tokio::test]
async fn test_send_failure_alerts_without_retry() {
    let h = harness(MockBot::failing(), Platform::Telegram);

    let response = h
        .chain
        .handle(&text_message(Platform::Telegram, 7, "Как сделать возврат?"))
        .await
        .unwrap();

    assert_eq!(response, HandlerResponse::Stop);
    assert!(h.bot.sent().is_empty());
    let alerts = h.alerts.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].0, AlertLevel::Error);
    assert_eq!(alerts[0].1, "Telegram Bot");
    assert!(alerts[0].2.starts_with("Ошибка отправки сообщения пользователю 7:"));
}

/// **Test: the same user on two platforms gets two different sessions.**
#[tokio::test]
async fn test_sessions_differ_across_platforms() {
    let h = harness(MockBot::new(), Platform::Telegram);

    h.chain
        .handle(&text_message(Platform::Telegram, 5, "вопрос"))
        .await
        .unwrap();
    h.chain
        .handle(&text_message(Platform::Vk, 5, "вопрос"))
        .await
        .unwrap();

    assert_eq!(
        *h.backend.sessions.lock().unwrap(),
        vec!["tg-5".to_string(), "vk-5".to_string()]
    );
}

/// **Test: a Telegram command other than a greeting is dropped; on VK the same text is a question.**
#[tokio::test]
async fn test_telegram_commands_skip_backend() {
    let h = harness(MockBot::new(), Platform::Telegram);

    let response = h
        .chain
        .handle(&text_message(Platform::Telegram, 9, "/help"))
        .await
        .unwrap();

    assert_eq!(response, HandlerResponse::Stop);
    assert_eq!(h.backend.calls(), 0);
    assert!(h.bot.sent().is_empty());
    assert!(h.alerts.alerts().is_empty());

    h.chain
        .handle(&text_message(Platform::Vk, 9, "/help"))
        .await
        .unwrap();
    assert_eq!(h.backend.calls(), 1);
}

/// **Test: "/start@bot" on Telegram is still a greeting, not a skipped command.**
#[tokio::test]
async fn test_telegram_start_with_mention_greets() {
    let h = harness(MockBot::new(), Platform::Telegram);

    h.chain
        .handle(&text_message(Platform::Telegram, 9, "/start@support_bot"))
        .await
        .unwrap();

    assert_eq!(h.bot.sent()[0].text, WELCOME_TEXT);
    assert_eq!(h.backend.calls(), 0);
}
