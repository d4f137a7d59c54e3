//! # relay-monitoring
//!
//! [`TelegramAlertSink`]: sends alerts through a separate monitoring bot to an admin chat.
//! Configured by [`MonitoringConfig`] (`MONITORING_BOT_TOKEN`, `ADMIN_CHAT_ID`).

mod config;
mod sink;

pub use config::{MonitoringConfig, DEFAULT_TELEGRAM_API_URL};
pub use sink::{format_alert, TelegramAlertSink, ALERT_TIMEOUT};
