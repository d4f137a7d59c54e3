//! # Dialogflow client
//!
//! Thin REST client for the Dialogflow ES v2 API: [`DialogflowClient::detect_intent`] for
//! dialogue, intent list/create/delete for the Q&A importer in [`import`].
//! Authentication goes through a [`TokenSource`]; production uses a service-account key file.

mod auth;
mod client;
pub mod import;
mod types;

pub use auth::{ServiceAccountKey, ServiceAccountTokenSource, StaticTokenSource, TokenSource};
pub use client::{DialogflowClient, DEFAULT_API_URL, REQUEST_TIMEOUT};
pub use types::{Intent, NewIntent, QueryResult};
