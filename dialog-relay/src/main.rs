//! dialog-relay: entry point. Loads `.env`, initializes logging, dispatches the CLI command.

use std::env;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use dialog_relay::{
    import_intents, report_config_problems, run_adapters, Adapters, Cli, Commands, ImportConfig,
};
use relay_core::{init_tracing, AlertSink};
use relay_monitoring::{MonitoringConfig, TelegramAlertSink};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let log_file = env::var("LOG_FILE").ok().filter(|v| !v.trim().is_empty());
    init_tracing(log_file.as_deref())?;

    let cli = Cli::parse();
    let alerts: Arc<dyn AlertSink> = Arc::new(TelegramAlertSink::new(MonitoringConfig::from_env()));

    match cli.command {
        Commands::Telegram { token } => run_adapters(Adapters::Telegram, token, alerts).await,
        Commands::Vk => run_adapters(Adapters::Vk, None, alerts).await,
        Commands::Run { token } => run_adapters(Adapters::Both, token, alerts).await,
        Commands::ImportIntents {
            url,
            replace,
            preview,
        } => {
            let config = match ImportConfig::from_env(url, preview) {
                Ok(config) => config,
                Err(problems) => {
                    report_config_problems(alerts.as_ref(), "Intent Import", &problems).await;
                    return Err(anyhow!("configuration invalid: {} problem(s)", problems.len()));
                }
            };
            import_intents(&config, replace, preview).await
        }
    }
}
