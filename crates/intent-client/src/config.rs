//! Dialogflow configuration: project id, service-account key file, language code.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_LANGUAGE_CODE: &str = "ru";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogflowConfig {
    pub project_id: String,
    pub key_file: PathBuf,
    pub language_code: String,
}

impl DialogflowConfig {
    /// Reads `DIALOGFLOW_PROJECT_ID`, `DIALOGFLOW_KEY_FILE` (must exist) and optional `DIALOGFLOW_LANGUAGE_CODE`.
    /// Returns every problem found, not just the first.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Vec<String>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut problems = Vec::new();
        let project_id = lookup("DIALOGFLOW_PROJECT_ID").filter(|v| !v.trim().is_empty());
        if project_id.is_none() {
            problems.push("DIALOGFLOW_PROJECT_ID не найден в переменных окружения!".to_string());
        }
        let key_file = lookup("DIALOGFLOW_KEY_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        match &key_file {
            None => problems.push("DIALOGFLOW_KEY_FILE не найден в переменных окружения!".to_string()),
            Some(path) if !path.exists() => {
                problems.push(format!("Файл {} не найден!", path.display()))
            }
            Some(_) => {}
        }
        let language_code = lookup("DIALOGFLOW_LANGUAGE_CODE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE_CODE.to_string());

        match (project_id, key_file) {
            (Some(project_id), Some(key_file)) if problems.is_empty() => Ok(Self {
                project_id,
                key_file,
                language_code,
            }),
            _ => Err(problems),
        }
    }

    pub fn from_env() -> Result<Self, Vec<String>> {
        Self::from_lookup(|key| env::var(key).ok())
    }
}
