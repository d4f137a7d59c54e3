//! # dialog_relay
//!
//! Relays Telegram and VK messages to Dialogflow. **Public API:** see [facade]: `run_adapters`,
//! `run_telegram`, `run_vk`, `run_all`, `import_intents`; configuration in [config].

mod assembly;
pub mod cli;
pub mod config;
mod facade;

pub use assembly::build_chain;
pub use cli::{Cli, Commands};
pub use config::{Adapters, ImportConfig, RelayConfig};
pub use facade::*;
