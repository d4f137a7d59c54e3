//! VK method API over reqwest: `groups.getLongPollServer`, `messages.send`, long-poll checks.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::{VkConfig, VK_API_VERSION};
use crate::types::{ApiError, LongPollResponse, LongPollServer};

/// Timeout for ordinary method calls. Long-poll checks add the wait time on top.
const METHOD_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct VkApiClient {
    http: reqwest::Client,
    config: VkConfig,
}

impl VkApiClient {
    pub fn new(config: VkConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &VkConfig {
        &self.config
    }

    /// Calls `method` with form params plus `access_token` and `v`; returns the `response` field.
    async fn call<T: DeserializeOwned>(&self, method: &str, params: &[(&str, String)]) -> Result<T> {
        let mut form: Vec<(&str, String)> = params.to_vec();
        form.push(("access_token", self.config.group_token.clone()));
        form.push(("v", VK_API_VERSION.to_string()));

        let response = self
            .http
            .post(self.config.method_url(method))
            .timeout(METHOD_TIMEOUT)
            .form(&form)
            .send()
            .await
            .with_context(|| format!("VK {} request failed", method))?;
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .with_context(|| format!("VK {} returned a non-JSON body ({})", method, status))?;

        if let Some(error) = body.get("error") {
            let error: ApiError = serde_json::from_value(error.clone())
                .with_context(|| format!("VK {} returned a malformed error", method))?;
            bail!("VK API error {}: {}", error.error_code, error.error_msg);
        }
        let payload = body
            .get("response")
            .cloned()
            .with_context(|| format!("VK {} response has no `response` field", method))?;
        serde_json::from_value(payload).with_context(|| format!("VK {} response malformed", method))
    }

    /// Obtains the long-poll server, key and initial `ts` for the community.
    #[instrument(skip(self))]
    pub async fn get_long_poll_server(&self) -> Result<LongPollServer> {
        let server: LongPollServer = self
            .call(
                "groups.getLongPollServer",
                &[("group_id", self.config.group_id.to_string())],
            )
            .await?;
        debug!(server = %server.server, ts = %server.ts, "Got long-poll server");
        Ok(server)
    }

    /// Sends `text` to `peer_id`. The random id makes VK drop accidental duplicates.
    #[instrument(skip(self, text))]
    pub async fn send_message(&self, peer_id: i64, text: &str) -> Result<i64> {
        let random_id: i32 = rand::random();
        self.call(
            "messages.send",
            &[
                ("peer_id", peer_id.to_string()),
                ("message", text.to_string()),
                ("random_id", random_id.to_string()),
            ],
        )
        .await
    }

    /// One `a_check` round trip against `server`, waiting up to `wait_secs`.
    pub(crate) async fn check_long_poll(
        &self,
        server: &LongPollServer,
        wait_secs: u64,
    ) -> Result<LongPollResponse> {
        let wait = wait_secs.to_string();
        let response = self
            .http
            .get(&server.server)
            .query(&[
                ("act", "a_check"),
                ("key", server.key.as_str()),
                ("ts", server.ts.as_str()),
                ("wait", wait.as_str()),
            ])
            .timeout(Duration::from_secs(wait_secs) + Duration::from_secs(10))
            .send()
            .await
            .context("VK long-poll request failed")?
            .error_for_status()
            .context("VK long-poll server returned an error status")?;
        response
            .json()
            .await
            .context("VK long-poll response malformed")
    }
}
