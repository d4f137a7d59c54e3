//! # relay-vk
//!
//! VK community bot connectivity over plain HTTPS: [`VkLongPollSource`] runs the Bots Long Poll
//! protocol, [`VkBot`] sends replies with `messages.send`, [`VkApiClient`] wraps the method API.

mod api;
mod bot;
mod config;
mod source;
mod types;

pub use api::VkApiClient;
pub use bot::VkBot;
pub use config::{VkConfig, DEFAULT_VK_API_URL, VK_API_VERSION};
pub use source::{VkLongPollSource, DEFAULT_WAIT_SECS};
pub use types::{LongPollServer, LongPollUpdate, VkMessage};
