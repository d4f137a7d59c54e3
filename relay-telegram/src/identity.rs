//! Startup `getMe`: confirms the token and reports the bot's @username.

use relay_core::{AlertLevel, AlertSink, Platform, ReconnectPolicy, RelayError, Result};
use teloxide::requests::Requester;
use tracing::{error, info, instrument, warn};

/// Calls `getMe` until it succeeds, retrying per `policy` with an ERROR alert on each failure.
///
/// Returns the username (empty if the bot has none). Fails only when the policy gives up.
#[instrument(skip_all)]
pub async fn fetch_bot_username(
    bot: &teloxide::Bot,
    policy: ReconnectPolicy,
    alerts: &dyn AlertSink,
) -> Result<String> {
    let mut failures: u32 = 0;
    loop {
        match bot.get_me().await {
            Ok(me) => {
                if failures > 0 {
                    info!(failures, "getMe succeeded after retries");
                }
                return Ok(me.user.username.clone().unwrap_or_default());
            }
            Err(e) => {
                failures += 1;
                error!(error = %e, failures, "Telegram getMe failed");
                alerts
                    .notify(
                        AlertLevel::Error,
                        Platform::Telegram.display_name(),
                        &format!("Ошибка подключения к Telegram: {}", e),
                    )
                    .await;
                if !policy.should_retry(failures) {
                    return Err(RelayError::Source(format!(
                        "getMe failed after {} attempts: {}",
                        failures, e
                    )));
                }
                warn!(delay_secs = policy.delay.as_secs_f64(), "Retrying getMe after delay");
                tokio::time::sleep(policy.delay).await;
            }
        }
    }
}
