//! # relay-telegram
//!
//! Telegram connectivity for the relay: [`TelegramUpdateSource`] long-polls `getUpdates`,
//! [`TelegramBotAdapter`] implements [`relay_core::Bot`], [`TelegramConfig`] reads the token,
//! [`fetch_bot_username`] checks it at startup.
//! No handler logic lives here.

mod adapters;
mod bot_adapter;
mod config;
mod identity;
mod source;

pub use adapters::{to_core_message, to_core_user};
pub use bot_adapter::TelegramBotAdapter;
pub use config::TelegramConfig;
pub use identity::fetch_bot_username;
pub use source::{TelegramUpdateSource, DEFAULT_POLL_TIMEOUT_SECS};
