//! # Handlers for the dialogue relay
//!
//! Chain order used by both adapters: [`LoggingHandler`] → [`GreetingHandler`] → [`IntentHandler`].
//! A greeting stops the chain with the welcome reply; every other text goes to the intent backend.

mod greeting;
mod intent;
mod logging;
mod reply;

pub use greeting::{is_command, is_greeting, GreetingHandler, DEFAULT_GREETINGS, WELCOME_TEXT};
pub use intent::IntentHandler;
pub use logging::LoggingHandler;
