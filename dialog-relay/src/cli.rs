//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dialog-relay")]
#[command(about = "Relays Telegram and VK messages to Dialogflow", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the Telegram adapter (token can override TELEGRAM_BOT_TOKEN).
    Telegram {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Run the VK adapter.
    Vk,
    /// Run the Telegram and VK adapters side by side.
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Create Dialogflow intents from a Q&A JSON file.
    ImportIntents {
        /// Q&A JSON URL; defaults to JSON_URL.
        #[arg(short, long)]
        url: Option<String>,
        /// Delete existing intents (except the default ones) first.
        #[arg(long)]
        replace: bool,
        /// Print what would be imported without calling Dialogflow.
        #[arg(long)]
        preview: bool,
    },
}
