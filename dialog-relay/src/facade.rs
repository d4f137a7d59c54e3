//! **Public entry points:** run one adapter, run both, or import intents.
//!
//! Each adapter runs as one sequential event loop. Network failures, including the startup
//! `getMe`, are retried per the reconnect policy; an exhausted policy or a bad client setup
//! raises a CRITICAL alert and is returned so the process exits non-zero.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use dialogflow_client::import::{
    delete_custom_intents, download_qa_set, import_qa_set, render_preview, render_report,
};
use dialogflow_client::DialogflowClient;
use handler_chain::run_event_loop;
use intent_client::{DialogflowBackend, IntentBackend};
use relay_core::{mask_token, AlertLevel, AlertSink, Platform};
use relay_telegram::{fetch_bot_username, TelegramBotAdapter, TelegramUpdateSource};
use relay_vk::{VkApiClient, VkBot, VkLongPollSource};
use tracing::{error, info, instrument};

use crate::assembly::build_chain;
use crate::config::{Adapters, ImportConfig, RelayConfig};

/// Builds the Dialogflow backend shared by all adapters (reads the service-account key).
pub fn build_backend(config: &RelayConfig) -> Result<Arc<dyn IntentBackend>> {
    let backend = DialogflowBackend::from_config(&config.dialogflow)
        .context("Failed to initialize Dialogflow client")?;
    info!(
        project_id = %config.dialogflow.project_id,
        key_file = %config.dialogflow.key_file.display(),
        "Dialogflow client ready"
    );
    Ok(Arc::new(backend))
}

/// Sends the CRITICAL alert for an adapter that could not start or gave up reconnecting.
async fn report_fatal(alerts: &dyn AlertSink, platform: Platform, e: anyhow::Error) -> anyhow::Error {
    let body = format!("Критическая ошибка при запуске бота: {:#}", e);
    error!(platform = %platform, "{}", body);
    alerts
        .notify(AlertLevel::Critical, platform.display_name(), &body)
        .await;
    e
}

async fn announce_start(alerts: &dyn AlertSink, platform: Platform) {
    let name = platform.display_name();
    info!(platform = %platform, "{} запускается...", name);
    alerts
        .notify(AlertLevel::Info, name, &format!("{} запускается...", name))
        .await;
}

/// Runs the Telegram adapter until its reconnect policy gives up.
#[instrument(skip_all)]
pub async fn run_telegram(
    config: RelayConfig,
    backend: Arc<dyn IntentBackend>,
    alerts: Arc<dyn AlertSink>,
) -> Result<()> {
    let platform = Platform::Telegram;
    let result: Result<()> = async {
        let tg_config = config
            .telegram
            .as_ref()
            .context("Telegram configuration missing")?;
        info!(token = %mask_token(&tg_config.bot_token), "Starting Telegram adapter");
        announce_start(alerts.as_ref(), platform).await;

        let bot = tg_config.build_bot()?;
        let username = fetch_bot_username(&bot, config.reconnect, alerts.as_ref()).await?;
        info!(username = %username, "Бот успешно запущен! @{}", username);
        alerts
            .notify(
                AlertLevel::Info,
                platform.display_name(),
                &format!("Telegram Bot успешно запущен! @{}", username),
            )
            .await;

        let chain = build_chain(
            &config,
            platform,
            Arc::new(TelegramBotAdapter::new(bot.clone())),
            backend,
            alerts.clone(),
        );
        let mut source = TelegramUpdateSource::new(bot);
        run_event_loop(&mut source, &chain, config.reconnect, alerts.clone()).await?;
        Ok(())
    }
    .await;

    match result {
        Ok(()) => Ok(()),
        Err(e) => Err(report_fatal(alerts.as_ref(), platform, e).await),
    }
}

/// Runs the VK adapter until its reconnect policy gives up.
#[instrument(skip_all)]
pub async fn run_vk(
    config: RelayConfig,
    backend: Arc<dyn IntentBackend>,
    alerts: Arc<dyn AlertSink>,
) -> Result<()> {
    let platform = Platform::Vk;
    let result: Result<()> = async {
        let vk_config = config.vk.clone().context("VK configuration missing")?;
        info!(
            group_id = vk_config.group_id,
            token = %mask_token(&vk_config.group_token),
            "Starting VK adapter"
        );
        announce_start(alerts.as_ref(), platform).await;

        let api = VkApiClient::new(vk_config);
        let chain = build_chain(
            &config,
            platform,
            Arc::new(VkBot::new(api.clone())),
            backend,
            alerts.clone(),
        );
        let mut source = VkLongPollSource::new(api);
        run_event_loop(&mut source, &chain, config.reconnect, alerts.clone()).await?;
        Ok(())
    }
    .await;

    match result {
        Ok(()) => Ok(()),
        Err(e) => Err(report_fatal(alerts.as_ref(), platform, e).await),
    }
}

/// Logs every configuration problem and sends one CRITICAL alert listing them.
pub async fn report_config_problems(alerts: &dyn AlertSink, source_name: &str, problems: &[String]) {
    for problem in problems {
        error!("{}", problem);
    }
    alerts
        .notify(AlertLevel::Critical, source_name, &problems.join("\n"))
        .await;
}

/// Loads configuration and runs the selected adapters. Nothing listens if configuration is invalid.
pub async fn run_adapters(
    adapters: Adapters,
    token_override: Option<String>,
    alerts: Arc<dyn AlertSink>,
) -> Result<()> {
    info!("=== Запуск проверки окружения ===");
    let config = match RelayConfig::from_env(adapters, token_override) {
        Ok(config) => config,
        Err(problems) => {
            report_config_problems(alerts.as_ref(), adapters.source_name(), &problems).await;
            return Err(anyhow!("configuration invalid: {} problem(s)", problems.len()));
        }
    };
    info!("Все переменные окружения проверены успешно");

    let backend = match build_backend(&config) {
        Ok(backend) => backend,
        Err(e) => {
            let body = format!("Критическая ошибка при запуске бота: {:#}", e);
            error!("{}", body);
            alerts
                .notify(AlertLevel::Critical, adapters.source_name(), &body)
                .await;
            return Err(e);
        }
    };

    match adapters {
        Adapters::Telegram => run_telegram(config, backend, alerts).await,
        Adapters::Vk => run_vk(config, backend, alerts).await,
        Adapters::Both => run_all(config, backend, alerts).await,
    }
}

/// Runs both adapters as independent tasks; returns once both have stopped.
pub async fn run_all(
    config: RelayConfig,
    backend: Arc<dyn IntentBackend>,
    alerts: Arc<dyn AlertSink>,
) -> Result<()> {
    let telegram = tokio::spawn(run_telegram(config.clone(), backend.clone(), alerts.clone()));
    let vk = tokio::spawn(run_vk(config, backend, alerts));

    let (telegram, vk) = tokio::join!(telegram, vk);
    let mut failures = Vec::new();
    for (name, joined) in [("telegram", telegram), ("vk", vk)] {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => failures.push(format!("{}: {:#}", name, e)),
            Err(e) => failures.push(format!("{}: task panicked: {}", name, e)),
        }
    }
    if failures.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("adapters stopped: {}", failures.join("; ")))
    }
}

/// Downloads the Q&A JSON and previews it, or writes it to Dialogflow as intents.
#[instrument(skip_all, fields(url = %config.json_url, replace = replace, preview = preview))]
pub async fn import_intents(config: &ImportConfig, replace: bool, preview: bool) -> Result<()> {
    let http = reqwest::Client::new();
    let qa_set = download_qa_set(&http, &config.json_url).await?;
    info!(intents = qa_set.len(), "Q&A JSON downloaded");

    if preview {
        println!("{}", render_preview(&qa_set));
        return Ok(());
    }

    let dialogflow = config
        .dialogflow
        .as_ref()
        .context("Dialogflow configuration missing")?;
    let client = DialogflowClient::from_key_file(&dialogflow.project_id, &dialogflow.key_file)?;

    let deleted = if replace {
        let deleted = delete_custom_intents(&client).await?;
        info!(deleted, "Existing intents deleted");
        deleted
    } else {
        0
    };

    let mut report = import_qa_set(&client, &qa_set, &dialogflow.language_code).await;
    report.deleted = deleted;
    println!("{}", render_report(&report));
    Ok(())
}
