//! # relay-core
//!
//! Core types and traits for the dialogue relay: [`Bot`], [`Handler`], [`AlertSink`], [`EventSource`],
//! platform-neutral message types, session naming, token masking and tracing initialization.
//! Transport-agnostic; used by handler-chain, relay-handlers and the platform crates.

pub mod alert;
pub mod bot;
pub mod error;
pub mod logger;
pub mod mask;
pub mod session;
pub mod source;
pub mod types;

pub use alert::{AlertLevel, AlertSink, NoopAlertSink};
pub use bot::Bot;
pub use error::{HandlerError, RelayError, Result};
pub use logger::init_tracing;
pub use mask::mask_token;
pub use session::derive_session_id;
pub use source::{EventSource, ReconnectPolicy};
pub use types::{Chat, Handler, HandlerResponse, Message, Platform, User};
