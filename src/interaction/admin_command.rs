//! Parsing and execution of `/admin` sub-commands.

use std::fmt::Write;

use tracing::{info, instrument, warn};

use crate::{
    base::{error::TriggerError, replies, types::TriggerEntry},
    trigger::{admin::AdminService, detector},
};

/// Maximum number of entries shown by `/admin list`.
pub const LIST_DISPLAY_LIMIT: usize = 30;

/// A parsed `/admin` sub-command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    Add { key: String, value: String },
    Remove { key: String },
    List,
    Search { needle: String },
    Count,
    Export,
    Info,
    Test,
    Help,
    /// Recognized sub-command with missing arguments; holds the usage line.
    Usage(&'static str),
    Unknown,
}

impl AdminCommand {
    /// Parses the arguments that follow `/admin`.
    pub fn parse(args: &str) -> Self {
        let parts: Vec<&str> = args.split_whitespace().collect();

        let Some(sub) = parts.first() else {
            return Self::Help;
        };

        match sub.to_lowercase().as_str() {
            "add" | "добавить" => match parts.as_slice() {
                [_, key, value @ ..] if !value.is_empty() => Self::Add {
                    key: key.to_string(),
                    value: value.join(" "),
                },
                _ => Self::Usage("❌ Использование: /admin add <ключ> <значение>\nПример: /admin add привет Привет!"),
            },
            "remove" | "удалить" | "del" => match parts.get(1) {
                Some(key) => Self::Remove { key: key.to_string() },
                None => Self::Usage("❌ Использование: /admin remove <ключ>"),
            },
            "search" | "найти" | "поиск" if parts.len() > 1 => Self::Search { needle: parts[1..].join(" ") },
            "search" | "найти" | "поиск" => Self::Usage("❌ Использование: /admin search <текст>"),
            "list" | "список" | "все" => Self::List,
            "count" | "количество" => Self::Count,
            "export" | "экспорт" => Self::Export,
            "info" | "инфо" => Self::Info,
            "test" | "тест" => Self::Test,
            "help" | "помощь" => Self::Help,
            _ => Self::Unknown,
        }
    }
}

/// Runs an `/admin` command for an already authorized user and renders the reply.
#[instrument(skip(admin))]
pub async fn execute_admin_command(args: &str, admin: &AdminService, admin_user_id: u64) -> String {
    let command = AdminCommand::parse(args);

    info!("Executing admin command {:?}.", command);

    match command {
        AdminCommand::Add { key, value } => match admin.add(&key, &value).await {
            Ok(entry) => format!("✅ Добавлено:\n{} → {}", entry.key, entry.value),
            Err(err) => render_error(&err),
        },
        AdminCommand::Remove { key } => match admin.remove(&key).await {
            Ok(key) => format!("✅ Удалено: {}", key),
            Err(err) => render_error(&err),
        },
        AdminCommand::List => match admin.list().await {
            Ok(entries) => render_list(entries),
            Err(err) => render_error(&err),
        },
        AdminCommand::Search { needle } => match admin.search(&needle).await {
            Ok(entries) => render_search(&needle, entries),
            Err(err) => render_error(&err),
        },
        AdminCommand::Count => match admin.count().await {
            Ok(count) => format!("📊 Статистика:\n• Всего фраз: {}\n• Админ ID: {}", count, admin_user_id),
            Err(err) => render_error(&err),
        },
        AdminCommand::Export => match admin.list().await {
            Ok(entries) => render_export(entries),
            Err(err) => render_error(&err),
        },
        AdminCommand::Info => replies::ADMIN_INFO_REPLY.to_string(),
        AdminCommand::Test => render_detector_test(replies::ADMIN_TEST_SAMPLE),
        AdminCommand::Help => replies::ADMIN_HELP_REPLY.to_string(),
        AdminCommand::Usage(usage) => usage.to_string(),
        AdminCommand::Unknown => replies::ADMIN_UNKNOWN_REPLY.to_string(),
    }
}

// Rendering.

fn render_error(err: &TriggerError) -> String {
    if err.is_store_failure() {
        warn!("Admin command failed on the store: {}", err);
    }

    match err {
        TriggerError::InvalidKey => "❌ Ошибка: ключ не может быть пустым".to_string(),
        TriggerError::NotFound(key) => format!("❌ Ошибка: ключ '{}' не найден", key),
        TriggerError::Store(_) | TriggerError::StoreUnavailable(_) => format!("❌ Ошибка базы данных: {}", err),
    }
}

fn sorted(mut entries: Vec<TriggerEntry>) -> Vec<TriggerEntry> {
    entries.sort_by(|a, b| a.key.cmp(&b.key));
    entries
}

fn render_list(entries: Vec<TriggerEntry>) -> String {
    if entries.is_empty() {
        return "📭 База данных пуста. Добавьте фразы через /admin add".to_string();
    }

    let total = entries.len();
    let mut out = format!("📋 Всего записей: {}\n\n", total);

    for (i, entry) in sorted(entries).iter().take(LIST_DISPLAY_LIMIT).enumerate() {
        let _ = write!(out, "{}. {}\n   → {}\n\n", i + 1, entry.key, entry.value);
    }

    if total > LIST_DISPLAY_LIMIT {
        let _ = writeln!(out, "... и еще {} записей", total - LIST_DISPLAY_LIMIT);
    }

    out
}

fn render_search(needle: &str, entries: Vec<TriggerEntry>) -> String {
    if entries.is_empty() {
        return format!("🔍 Не найдено записей, содержащих '{}'", needle);
    }

    let mut out = format!("🔍 Найдено {} записей:\n\n", entries.len());

    for (i, entry) in sorted(entries).iter().enumerate() {
        let _ = write!(out, "{}. {}\n   → {}\n\n", i + 1, entry.key, entry.value);
    }

    out
}

fn render_export(entries: Vec<TriggerEntry>) -> String {
    let mut out = String::from("📦 Экспорт данных:\n\n");

    for entry in sorted(entries) {
        let _ = writeln!(out, "{} → {}", entry.key, entry.value);
    }

    out
}

fn render_detector_test(sample: &str) -> String {
    let result = if detector::detect(sample) { "✅ Найдено" } else { "❌ Не найдено" };

    format!("🧪 Тест ЕБ-детектора:\nСообщение: '{}'\nРезультат: {}\n\nНапишите 'ЕБ' большими буквами отдельным словом.", sample, result)
}
