//! Bots Long Poll as an [`EventSource`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use relay_core::{Chat, EventSource, Message, Platform, RelayError, Result, User};
use tracing::{debug, info, warn};

use crate::api::VkApiClient;
use crate::types::{LongPollServer, VkMessage};

/// Seconds the long-poll server holds each request open.
pub const DEFAULT_WAIT_SECS: u64 = 25;

/// Holds the current long-poll server; any failure drops it so the next call re-fetches one.
///
/// An expired key (`failed=2`) keeps the last `ts` so events sent meanwhile are not skipped.
pub struct VkLongPollSource {
    api: VkApiClient,
    server: Option<LongPollServer>,
    resume_ts: Option<String>,
    wait_secs: u64,
}

impl VkLongPollSource {
    pub fn new(api: VkApiClient) -> Self {
        Self {
            api,
            server: None,
            resume_ts: None,
            wait_secs: DEFAULT_WAIT_SECS,
        }
    }

    pub fn with_wait_secs(mut self, wait_secs: u64) -> Self {
        self.wait_secs = wait_secs;
        self
    }

    /// Current `ts`, if connected.
    pub fn ts(&self) -> Option<&str> {
        self.server.as_ref().map(|s| s.ts.as_str())
    }

    /// Fetches a server now; startup uses this to fail fast on bad credentials.
    pub async fn connect(&mut self) -> Result<()> {
        let mut server = self
            .api
            .get_long_poll_server()
            .await
            .map_err(|e| RelayError::Source(format!("{:#}", e)))?;
        if let Some(ts) = self.resume_ts.take() {
            server.ts = ts;
        }
        info!(server = %server.server, ts = %server.ts, "VK long-poll connected");
        self.server = Some(server);
        Ok(())
    }

    fn to_core_message(message: VkMessage) -> Message {
        Message {
            id: message.id.to_string(),
            platform: Platform::Vk,
            user: User {
                id: message.from_id,
                username: None,
                first_name: None,
            },
            chat: Chat {
                id: message.peer_id,
                chat_type: if message.peer_id == message.from_id {
                    "user".to_string()
                } else {
                    "chat".to_string()
                },
            },
            content: message.text,
            created_at: DateTime::<Utc>::from_timestamp(message.date, 0).unwrap_or_else(Utc::now),
        }
    }
}

#[async_trait]
impl EventSource for VkLongPollSource {
    fn platform(&self) -> Platform {
        Platform::Vk
    }

    async fn next_batch(&mut self) -> Result<Vec<Message>> {
        if self.server.is_none() {
            self.connect().await?;
        }
        let Some(server) = self.server.as_mut() else {
            return Ok(Vec::new());
        };

        let response = match self.api.check_long_poll(server, self.wait_secs).await {
            Ok(response) => response,
            Err(e) => {
                self.server = None;
                return Err(RelayError::Source(format!("{:#}", e)));
            }
        };

        match response.failed {
            None => {}
            // History outdated: continue from the returned ts.
            Some(1) => {
                warn!("VK long-poll history outdated, continuing with new ts");
                if let Some(ts) = response.ts {
                    server.ts = ts;
                }
                return Ok(Vec::new());
            }
            // Key expired: new key, same ts.
            Some(2) => {
                warn!("VK long-poll key expired, requesting a new key");
                self.resume_ts = Some(server.ts.clone());
                self.server = None;
                return Ok(Vec::new());
            }
            // Information lost (3) or unknown: start over with a fresh server and ts.
            Some(code) => {
                warn!(failed = code, "VK long-poll state lost, reconnecting");
                self.server = None;
                return Ok(Vec::new());
            }
        }
        if let Some(ts) = response.ts {
            server.ts = ts;
        }

        let mut batch = Vec::new();
        for update in response.updates {
            let Some(message) = update.new_message() else {
                debug!(kind = %update.kind, "Skipping VK event");
                continue;
            };
            if message.text.trim().is_empty() {
                debug!(peer_id = message.peer_id, "Skipping non-text VK message");
                continue;
            }
            info!(user_id = message.from_id, "Получено сообщение");
            batch.push(Self::to_core_message(message));
        }
        Ok(batch)
    }
}
