//! Operational alerts for the administrator channel.
//!
//! [`AlertSink::notify`] returns `()`: delivery is best-effort and an alert lost in transit is
//! not recovered. Implementations log and swallow their own failures.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Error,
    Critical,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Info => "INFO",
            AlertLevel::Error => "ERROR",
            AlertLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination for operational alerts. Never fails to its caller.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Sends `body` at `level`, attributed to `source_name` (e.g. "VK Bot").
    async fn notify(&self, level: AlertLevel, source_name: &str, body: &str);
}

/// Sink that drops every alert.
pub struct NoopAlertSink;

#[async_trait]
impl AlertSink for NoopAlertSink {
    async fn notify(&self, _level: AlertLevel, _source_name: &str, _body: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_level_strings() {
        assert_eq!(AlertLevel::Info.to_string(), "INFO");
        assert_eq!(AlertLevel::Error.to_string(), "ERROR");
        assert_eq!(AlertLevel::Critical.as_str(), "CRITICAL");
    }

    #[tokio::test]
    async fn test_noop_sink_accepts_alerts() {
        NoopAlertSink
            .notify(AlertLevel::Error, "VK Bot", "boom")
            .await;
    }
}
