//! Dialogflow ES v2 REST calls.

use anyhow::{anyhow, bail, Context, Result};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::auth::{ServiceAccountTokenSource, TokenSource};
use crate::types::{
    ApiErrorResponse, DetectIntentRequest, DetectIntentResponse, Intent, ListIntentsResponse,
    NewIntent, QueryInput, QueryResult, TextInput,
};

pub const DEFAULT_API_URL: &str = "https://dialogflow.googleapis.com/v2";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct DialogflowClient {
    http: reqwest::Client,
    api_url: String,
    project_id: String,
    tokens: Arc<dyn TokenSource>,
}

impl DialogflowClient {
    pub fn new(project_id: impl Into<String>, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: DEFAULT_API_URL.to_string(),
            project_id: project_id.into(),
            tokens,
        }
    }

    /// Client authenticated with the service-account key at `key_file`.
    pub fn from_key_file(project_id: impl Into<String>, key_file: impl AsRef<Path>) -> Result<Self> {
        let tokens = ServiceAccountTokenSource::from_file(key_file)?;
        Ok(Self::new(project_id, Arc::new(tokens)))
    }

    /// Overrides the API base URL (regional endpoints, tests).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn agent_path(&self) -> String {
        format!("projects/{}/agent", self.project_id)
    }

    pub fn session_path(&self, session_id: &str) -> String {
        format!("{}/sessions/{}", self.agent_path(), session_id)
    }

    async fn request(&self, method: Method, resource: &str) -> Result<RequestBuilder> {
        let token = self
            .tokens
            .access_token()
            .await
            .context("authentication failed")?;
        Ok(self
            .http
            .request(method, format!("{}/{}", self.api_url, resource))
            .timeout(REQUEST_TIMEOUT)
            .bearer_auth(token))
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(err) => Err(anyhow!(
                "Dialogflow API error {} {}: {}",
                status,
                err.error.status,
                err.error.message
            )),
            Err(_) => Err(anyhow!("Dialogflow API error {}: {}", status, body)),
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = Self::check(response).await?;
        response
            .json::<T>()
            .await
            .context("malformed Dialogflow response")
    }

    /// Sends `text` for intent matching in the given session.
    #[instrument(skip(self, text))]
    pub async fn detect_intent(
        &self,
        session_id: &str,
        text: &str,
        language_code: &str,
    ) -> Result<QueryResult> {
        let body = DetectIntentRequest {
            query_input: QueryInput {
                text: TextInput {
                    text,
                    language_code,
                },
            },
        };
        let resource = format!("{}:detectIntent", self.session_path(session_id));
        let response = self
            .request(Method::POST, &resource)
            .await?
            .json(&body)
            .send()
            .await
            .context("detectIntent request failed")?;
        let parsed: DetectIntentResponse = Self::read_json(response).await?;
        let result = parsed
            .query_result
            .ok_or_else(|| anyhow!("malformed Dialogflow response: missing queryResult"))?;
        debug!(
            intent = ?result.intent.as_ref().map(|i| i.display_name.as_str()),
            confidence = result.intent_detection_confidence,
            "detectIntent done"
        );
        Ok(result)
    }

    /// All intents of the agent, following pagination.
    pub async fn list_intents(&self) -> Result<Vec<Intent>> {
        let mut intents = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut request = self
                .request(Method::GET, &format!("{}/intents", self.agent_path()))
                .await?;
            if let Some(token) = page_token.as_deref() {
                request = request.query(&[("pageToken", token)]);
            }
            let response = request.send().await.context("listIntents request failed")?;
            let page: ListIntentsResponse = Self::read_json(response).await?;
            intents.extend(page.intents);
            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }
        Ok(intents)
    }

    pub async fn create_intent(&self, intent: &NewIntent, language_code: &str) -> Result<Intent> {
        let response = self
            .request(Method::POST, &format!("{}/intents", self.agent_path()))
            .await?
            .query(&[("languageCode", language_code)])
            .json(intent)
            .send()
            .await
            .context("createIntent request failed")?;
        Self::read_json(response).await
    }

    /// `name` is the full resource name (`projects/.../agent/intents/<uuid>`).
    pub async fn delete_intent(&self, name: &str) -> Result<()> {
        if !name.starts_with(&self.agent_path()) {
            bail!("intent {} does not belong to project {}", name, self.project_id);
        }
        let response = self
            .request(Method::DELETE, name)
            .await?
            .send()
            .await
            .context("deleteIntent request failed")?;
        Self::check(response).await?;
        Ok(())
    }
}
