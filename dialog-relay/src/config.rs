//! Process configuration: which adapters run, their settings, Dialogflow, reconnect policy, greetings.
//!
//! Every constructor takes a `lookup` closure instead of reading the environment directly and
//! reports all problems at once.

use std::env;
use std::time::Duration;

use intent_client::DialogflowConfig;
use relay_core::{Platform, ReconnectPolicy};
use relay_handlers::DEFAULT_GREETINGS;
use relay_telegram::TelegramConfig;
use relay_vk::VkConfig;

/// Adapters selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adapters {
    Telegram,
    Vk,
    Both,
}

impl Adapters {
    pub fn telegram(self) -> bool {
        matches!(self, Adapters::Telegram | Adapters::Both)
    }

    pub fn vk(self) -> bool {
        matches!(self, Adapters::Vk | Adapters::Both)
    }

    /// Alert source name for problems that concern the whole selection.
    pub fn source_name(self) -> &'static str {
        match self {
            Adapters::Telegram => Platform::Telegram.display_name(),
            Adapters::Vk => Platform::Vk.display_name(),
            Adapters::Both => "Dialog Relay",
        }
    }
}

/// Immutable runtime configuration, loaded once at startup.
#[derive(Clone)]
pub struct RelayConfig {
    pub telegram: Option<TelegramConfig>,
    pub vk: Option<VkConfig>,
    pub dialogflow: DialogflowConfig,
    pub reconnect: ReconnectPolicy,
    pub greetings: Vec<String>,
}

impl RelayConfig {
    /// `token_override` (from `--token`) takes precedence over `TELEGRAM_BOT_TOKEN`.
    pub fn from_lookup<F>(
        adapters: Adapters,
        token_override: Option<String>,
        lookup: F,
    ) -> Result<Self, Vec<String>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| {
            if key == "TELEGRAM_BOT_TOKEN" {
                token_override.clone().or_else(|| lookup(key))
            } else {
                lookup(key)
            }
        };
        let mut problems = Vec::new();

        let telegram = if adapters.telegram() {
            collect(TelegramConfig::from_lookup(&lookup), &mut problems)
        } else {
            None
        };
        let vk = if adapters.vk() {
            collect(VkConfig::from_lookup(&lookup), &mut problems)
        } else {
            None
        };
        let dialogflow = collect(DialogflowConfig::from_lookup(&lookup), &mut problems);
        let reconnect = collect(reconnect_policy_from_lookup(&lookup), &mut problems);
        let greetings = greetings_from_lookup(&lookup);

        match (dialogflow, reconnect) {
            (Some(dialogflow), Some(reconnect)) if problems.is_empty() => Ok(Self {
                telegram,
                vk,
                dialogflow,
                reconnect,
                greetings,
            }),
            _ => Err(problems),
        }
    }

    pub fn from_env(adapters: Adapters, token_override: Option<String>) -> Result<Self, Vec<String>> {
        Self::from_lookup(adapters, token_override, |key| env::var(key).ok())
    }
}

fn collect<T>(result: Result<T, Vec<String>>, problems: &mut Vec<String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(mut found) => {
            problems.append(&mut found);
            None
        }
    }
}

/// `RECONNECT_DELAY_SECS` (default 10) and `RECONNECT_MAX_ATTEMPTS` (default unbounded).
pub fn reconnect_policy_from_lookup<F>(lookup: F) -> Result<ReconnectPolicy, Vec<String>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut problems = Vec::new();
    let mut policy = ReconnectPolicy::default();

    if let Some(raw) = lookup("RECONNECT_DELAY_SECS").filter(|v| !v.trim().is_empty()) {
        match raw.trim().parse::<u64>() {
            Ok(secs) => policy.delay = Duration::from_secs(secs),
            Err(_) => problems.push(format!(
                "RECONNECT_DELAY_SECS должен быть целым числом секунд: {}",
                raw
            )),
        }
    }
    if let Some(raw) = lookup("RECONNECT_MAX_ATTEMPTS").filter(|v| !v.trim().is_empty()) {
        match raw.trim().parse::<u32>() {
            Ok(max) if max > 0 => policy = policy.with_max_attempts(max),
            _ => problems.push(format!(
                "RECONNECT_MAX_ATTEMPTS должен быть положительным целым числом: {}",
                raw
            )),
        }
    }

    if problems.is_empty() {
        Ok(policy)
    } else {
        Err(problems)
    }
}

/// Default greeting literals plus the comma-separated `GREETINGS` extras.
pub fn greetings_from_lookup<F>(lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut greetings: Vec<String> = DEFAULT_GREETINGS.iter().map(|g| g.to_string()).collect();
    if let Some(extra) = lookup("GREETINGS") {
        for literal in extra.split(',') {
            let literal = literal.trim().to_lowercase();
            if !literal.is_empty() && !greetings.contains(&literal) {
                greetings.push(literal);
            }
        }
    }
    greetings
}

/// Settings for `import-intents`. Dialogflow is only required when intents are actually written.
pub struct ImportConfig {
    pub json_url: String,
    pub dialogflow: Option<DialogflowConfig>,
}

impl ImportConfig {
    pub fn from_lookup<F>(
        url_override: Option<String>,
        preview: bool,
        lookup: F,
    ) -> Result<Self, Vec<String>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut problems = Vec::new();
        let json_url = url_override
            .or_else(|| lookup("JSON_URL"))
            .filter(|v| !v.trim().is_empty());
        if json_url.is_none() {
            problems.push("JSON_URL не найден в переменных окружения!".to_string());
        }
        let dialogflow = if preview {
            None
        } else {
            collect(DialogflowConfig::from_lookup(&lookup), &mut problems)
        };
        match json_url {
            Some(json_url) if problems.is_empty() => Ok(Self {
                json_url,
                dialogflow,
            }),
            _ => Err(problems),
        }
    }

    pub fn from_env(url_override: Option<String>, preview: bool) -> Result<Self, Vec<String>> {
        Self::from_lookup(url_override, preview, |key| env::var(key).ok())
    }
}
