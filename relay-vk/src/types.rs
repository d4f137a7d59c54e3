//! Wire types for the VK method API and Bots Long Poll.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `groups.getLongPollServer` response.
#[derive(Debug, Clone, Deserialize)]
pub struct LongPollServer {
    pub key: String,
    pub server: String,
    #[serde(deserialize_with = "string_or_number")]
    pub ts: String,
}

/// One `a_check` reply: either updates with the next `ts`, or a `failed` code.
#[derive(Debug, Deserialize)]
pub(crate) struct LongPollResponse {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub ts: Option<String>,
    #[serde(default)]
    pub updates: Vec<LongPollUpdate>,
    pub failed: Option<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LongPollUpdate {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub object: Value,
}

impl LongPollUpdate {
    /// The inbound message of a `message_new` event.
    pub fn new_message(&self) -> Option<VkMessage> {
        if self.kind != "message_new" {
            return None;
        }
        let message = self.object.get("message").unwrap_or(&self.object);
        serde_json::from_value(message.clone()).ok()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VkMessage {
    #[serde(default)]
    pub id: i64,
    pub from_id: i64,
    pub peer_id: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub date: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    pub error_code: i64,
    pub error_msg: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    string_or_number(deserializer).map(Some)
}
