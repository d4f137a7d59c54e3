//! Wire types for the Dialogflow ES v2 REST API (camelCase JSON).

use serde::{Deserialize, Serialize};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DetectIntentRequest<'a> {
    pub query_input: QueryInput<'a>,
}

#[derive(Serialize)]
pub(crate) struct QueryInput<'a> {
    pub text: TextInput<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TextInput<'a> {
    pub text: &'a str,
    pub language_code: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DetectIntentResponse {
    #[serde(default)]
    pub query_result: Option<QueryResult>,
}

/// Result of `detectIntent`. Only the fields the relay reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub query_text: String,
    #[serde(default)]
    pub fulfillment_text: String,
    /// Absent when no intent matched at all.
    #[serde(default)]
    pub intent: Option<Intent>,
    #[serde(default)]
    pub intent_detection_confidence: f32,
}

impl QueryResult {
    pub fn is_fallback(&self) -> bool {
        self.intent.as_ref().is_some_and(|i| i.is_fallback)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    /// `projects/<project>/agent/intents/<uuid>`
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub is_fallback: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListIntentsResponse {
    #[serde(default)]
    pub intents: Vec<Intent>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Intent to create: training phrases and one text response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIntent {
    pub display_name: String,
    pub training_phrases: Vec<TrainingPhrase>,
    pub messages: Vec<IntentMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingPhrase {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntentMessage {
    pub text: MessageText,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageText {
    pub text: Vec<String>,
}

impl NewIntent {
    /// One training phrase per question, a single text message with the answer.
    pub fn from_qa(display_name: impl Into<String>, questions: &[String], answer: &str) -> Self {
        Self {
            display_name: display_name.into(),
            training_phrases: questions
                .iter()
                .map(|q| TrainingPhrase {
                    parts: vec![Part { text: q.clone() }],
                })
                .collect(),
            messages: vec![IntentMessage {
                text: MessageText {
                    text: vec![answer.to_string()],
                },
            }],
        }
    }
}

/// Google API error envelope.
#[derive(Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: ApiError,
}

#[derive(Deserialize)]
pub(crate) struct ApiError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}
