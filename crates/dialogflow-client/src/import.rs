//! Q&A import: turns a JSON map of `{ name: { questions, answer } }` into Dialogflow intents.
//!
//! Per-intent failures are collected into the [`ImportReport`]; only the download and
//! the listing of existing intents abort the import.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt::Write as _;
use tracing::{error, info, instrument};

use crate::client::DialogflowClient;
use crate::types::NewIntent;

/// Dialogflow's display-name limit.
pub const MAX_DISPLAY_NAME_CHARS: usize = 64;

/// Built-in intents that `--replace` keeps.
pub const PROTECTED_INTENTS: [&str; 2] = ["Default Welcome Intent", "Default Fallback Intent"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QaEntry {
    pub questions: Vec<String>,
    pub answer: String,
}

/// Intents in the order they appear in the JSON file.
pub type QaSet = IndexMap<String, QaEntry>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub total: usize,
    pub created: usize,
    pub deleted: usize,
    /// `'name': error` per failed intent.
    pub errors: Vec<String>,
}

pub fn parse_qa_set(raw: &str) -> Result<QaSet> {
    serde_json::from_str(raw).context("Q&A JSON must map intent names to {questions, answer}")
}

pub async fn download_qa_set(http: &reqwest::Client, url: &str) -> Result<QaSet> {
    let response = http
        .get(url)
        .send()
        .await
        .with_context(|| format!("failed to download {}", url))?
        .error_for_status()
        .with_context(|| format!("failed to download {}", url))?;
    let raw = response.text().await?;
    parse_qa_set(&raw)
}

/// Lowercase, spaces to `_`, at most 64 characters.
pub fn normalize_display_name(name: &str) -> String {
    name.to_lowercase()
        .replace(' ', "_")
        .chars()
        .take(MAX_DISPLAY_NAME_CHARS)
        .collect()
}

/// Deletes every intent except [`PROTECTED_INTENTS`]. Returns how many were deleted.
pub async fn delete_custom_intents(client: &DialogflowClient) -> Result<usize> {
    let intents = client.list_intents().await?;
    let mut deleted = 0;
    for intent in intents
        .iter()
        .filter(|i| !PROTECTED_INTENTS.contains(&i.display_name.as_str()))
    {
        match client.delete_intent(&intent.name).await {
            Ok(()) => {
                info!(display_name = %intent.display_name, "Deleted intent");
                deleted += 1;
            }
            Err(e) => error!(display_name = %intent.display_name, error = %e, "Failed to delete intent"),
        }
    }
    Ok(deleted)
}

/// Creates one intent per entry; failures are recorded and the import continues.
#[instrument(skip(client, qa_set))]
pub async fn import_qa_set(
    client: &DialogflowClient,
    qa_set: &QaSet,
    language_code: &str,
) -> ImportReport {
    let mut report = ImportReport {
        total: qa_set.len(),
        ..Default::default()
    };
    for (name, entry) in qa_set {
        let intent = NewIntent::from_qa(normalize_display_name(name), &entry.questions, &entry.answer);
        match client.create_intent(&intent, language_code).await {
            Ok(_) => {
                info!(
                    intent = %name,
                    training_phrases = entry.questions.len(),
                    "Intent created"
                );
                report.created += 1;
            }
            Err(e) => {
                error!(intent = %name, error = %e, "Failed to create intent");
                report.errors.push(format!("'{}': {:#}", name, e));
            }
        }
    }
    report
}

fn prefix(text: &str, chars: usize) -> String {
    text.chars().take(chars).collect()
}

/// Human-readable preview: per intent the question count, first three questions and the answer start.
pub fn render_preview(qa_set: &QaSet) -> String {
    let mut out = String::from("👀 Предпросмотр интентов:\n");
    for (name, entry) in qa_set {
        let _ = writeln!(out, "\n📋 Интент: {}", name);
        let _ = writeln!(out, "   ❓ Вопросы: {}", entry.questions.len());
        for (i, question) in entry.questions.iter().take(3).enumerate() {
            let _ = writeln!(out, "      {}. {}", i + 1, question);
        }
        if entry.questions.len() > 3 {
            let _ = writeln!(out, "      ... и еще {} вопросов", entry.questions.len() - 3);
        }
        let _ = writeln!(out, "   💬 Ответ: {}...", prefix(&entry.answer, 100));
    }
    let questions: usize = qa_set.values().map(|e| e.questions.len()).sum();
    let _ = writeln!(out, "\n📊 Всего интентов: {}", qa_set.len());
    let _ = writeln!(out, "📝 Всего вопросов: {}", questions);
    out
}

/// Summary printed after an import.
pub fn render_report(report: &ImportReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "✅ JSON загружен. Найдено интентов: {}", report.total);
    if report.deleted > 0 {
        let _ = writeln!(out, "🗑️ Удалено интентов: {}", report.deleted);
    }
    let _ = writeln!(out, "🔄 Создано новых интентов: {}", report.created);
    if !report.errors.is_empty() {
        let _ = writeln!(out, "\n⚠️  Произошло ошибок: {}", report.errors.len());
        for err in &report.errors {
            let _ = writeln!(out, "   ❌ {}", err);
        }
    }
    let _ = writeln!(out, "🎉 Импорт завершен!");
    let _ = writeln!(out, "\n⚠️  Не забудьте ОПУБЛИКОВАТЬ агента в Dialogflow Console!");
    out
}
