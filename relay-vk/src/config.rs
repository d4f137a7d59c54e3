//! VK community token, id and API endpoint.

use std::env;

pub const DEFAULT_VK_API_URL: &str = "https://api.vk.com/method";
pub const VK_API_VERSION: &str = "5.131";

#[derive(Clone)]
pub struct VkConfig {
    pub group_token: String,
    pub group_id: u64,
    pub api_url: String,
}

impl VkConfig {
    pub fn new(group_token: impl Into<String>, group_id: u64) -> Self {
        Self {
            group_token: group_token.into(),
            group_id,
            api_url: DEFAULT_VK_API_URL.to_string(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Reads `VK_GROUP_TOKEN`, `VK_GROUP_ID` (digits only) and optional `VK_API_URL`.
    /// Returns every problem found.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Vec<String>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut problems = Vec::new();
        let group_token = lookup("VK_GROUP_TOKEN").filter(|v| !v.trim().is_empty());
        if group_token.is_none() {
            problems.push("VK_GROUP_TOKEN не найден в переменных окружения!".to_string());
        }
        let group_id = match lookup("VK_GROUP_ID").filter(|v| !v.trim().is_empty()) {
            None => {
                problems.push("VK_GROUP_ID не найден в переменных окружения!".to_string());
                None
            }
            Some(raw) if raw.chars().all(|c| c.is_ascii_digit()) => raw.parse::<u64>().ok(),
            Some(_) => {
                problems.push("VK_GROUP_ID должен содержать только цифры!".to_string());
                None
            }
        };
        let api_url = lookup("VK_API_URL").filter(|v| !v.trim().is_empty());

        match (group_token, group_id) {
            (Some(group_token), Some(group_id)) if problems.is_empty() => {
                let config = Self::new(group_token, group_id);
                Ok(match api_url {
                    Some(url) => config.with_api_url(url),
                    None => config,
                })
            }
            _ => Err(problems),
        }
    }

    pub fn from_env() -> Result<Self, Vec<String>> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.api_url, method)
    }
}
