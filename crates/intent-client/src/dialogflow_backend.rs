//! [`IntentBackend`] over the Dialogflow REST client.

use anyhow::Result;
use async_trait::async_trait;
use dialogflow_client::DialogflowClient;

use crate::config::DialogflowConfig;
use crate::{IntentBackend, IntentResult};

pub struct DialogflowBackend {
    client: DialogflowClient,
}

impl DialogflowBackend {
    pub fn new(client: DialogflowClient) -> Self {
        Self { client }
    }

    /// Reads the service-account key and builds the client.
    pub fn from_config(config: &DialogflowConfig) -> Result<Self> {
        Ok(Self::new(DialogflowClient::from_key_file(
            &config.project_id,
            &config.key_file,
        )?))
    }
}

#[async_trait]
impl IntentBackend for DialogflowBackend {
    async fn detect_intent(
        &self,
        text: &str,
        session_id: &str,
        language_code: &str,
    ) -> Result<IntentResult> {
        let result = self
            .client
            .detect_intent(session_id, text, language_code)
            .await?;
        Ok(IntentResult {
            is_fallback: result.is_fallback(),
            reply_text: result.fulfillment_text,
        })
    }
}
