//! Inbound event sources (long-poll loops) and the reconnect policy applied when they fail.

use crate::error::Result;
use crate::types::{Message, Platform};
use async_trait::async_trait;
use std::time::Duration;

/// Default wait between reconnect attempts.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(10);

/// A platform's inbound event stream. One call = one long-poll round trip.
///
/// After an error the runner waits per [`ReconnectPolicy`] and calls `next_batch` again;
/// implementations must re-establish whatever connection state they lost.
#[async_trait]
pub trait EventSource: Send {
    fn platform(&self) -> Platform;

    /// Blocks until new text messages arrive (or the poll times out with an empty batch).
    async fn next_batch(&mut self) -> Result<Vec<Message>>;
}

/// Fixed-delay reconnect policy. `max_attempts = None` retries forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub delay: Duration,
    /// Consecutive failures tolerated before giving up.
    pub max_attempts: Option<u32>,
}

impl ReconnectPolicy {
    /// Unbounded retries with the given delay.
    pub fn fixed(delay: Duration) -> Self {
        Self {
            delay,
            max_attempts: None,
        }
    }

    /// Zero-delay policy; used by tests instead of a wall-clock sleep.
    pub fn immediate() -> Self {
        Self::fixed(Duration::ZERO)
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Returns true if another attempt is allowed after `failures` consecutive failures.
    pub fn should_retry(&self, failures: u32) -> bool {
        self.max_attempts.map_or(true, |max| failures < max)
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::fixed(DEFAULT_RECONNECT_DELAY)
    }
}
