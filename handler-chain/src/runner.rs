//! Event loop: pulls batches from an [`EventSource`] and runs each message through the chain,
//! strictly sequentially. Source failures are alerted and retried per [`ReconnectPolicy`].

use relay_core::{AlertLevel, AlertSink, EventSource, ReconnectPolicy, RelayError, Result};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::HandlerChain;

/// Runs until the policy gives up (never, with the default unbounded policy).
///
/// Handler chain errors drop the current message after an ERROR alert; they never stop the loop.
#[instrument(skip_all, fields(platform = %source.platform()))]
pub async fn run_event_loop<S>(
    source: &mut S,
    chain: &HandlerChain,
    policy: ReconnectPolicy,
    alerts: Arc<dyn AlertSink>,
) -> Result<()>
where
    S: EventSource + ?Sized,
{
    let source_name = source.platform().display_name();
    let mut failures: u32 = 0;

    info!("Waiting for long-poll events");
    loop {
        match source.next_batch().await {
            Ok(batch) => {
                if failures > 0 {
                    info!(failures, "Event source reconnected");
                    failures = 0;
                }
                for message in batch {
                    if let Err(e) = chain.handle(&message).await {
                        let body = format!("Ошибка обработки сообщения от {}: {}", message.user.id, e);
                        error!(error = %e, user_id = message.user.id, "Handler chain failed");
                        alerts.notify(AlertLevel::Error, source_name, &body).await;
                    }
                }
            }
            Err(e) => {
                failures += 1;
                error!(error = %e, failures, "Event loop failed");
                alerts
                    .notify(
                        AlertLevel::Error,
                        source_name,
                        &format!("Ошибка в основном цикле: {}", e),
                    )
                    .await;
                if !policy.should_retry(failures) {
                    return Err(RelayError::Source(format!(
                        "giving up after {} consecutive failures: {}",
                        failures, e
                    )));
                }
                warn!(delay_secs = policy.delay.as_secs_f64(), "Reconnecting after delay");
                tokio::time::sleep(policy.delay).await;
            }
        }
    }
}
