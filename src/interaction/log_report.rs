//! Human-readable report of every inbound message, sent to the log chat.

use tracing::{Instrument, error, info, instrument};

use crate::{
    base::types::{ChatKind, IncomingMessage, MessageKind, Void},
    service::chat::ChatClient,
};

/// Longest report sent, in bytes, before the truncation notice.
const REPORT_LIMIT: usize = 4000;

/// Longest quoted reply, in bytes, before the ellipsis.
const REPLY_QUOTE_LIMIT: usize = 100;

/// Handles sending a message report to the log chat.
///
/// It spawns a new task to handle the event asynchronously.
#[instrument(skip_all)]
pub fn handle_log_report(message: IncomingMessage, log_chat_id: i64, chat: ChatClient) {
    tokio::spawn(
        async move {
            let result = handle_log_report_internal(&message, log_chat_id, &chat).await;

            if let Err(err) = &result {
                error!("Error while sending the log report: {}", err);
            }
        }
        .in_current_span(),
    );
}

#[instrument(skip(message, chat))]
async fn handle_log_report_internal(message: &IncomingMessage, log_chat_id: i64, chat: &ChatClient) -> Void {
    let report = format_report(message, chat.bot_user_id(), &chat.bot_username());

    chat.send_text(log_chat_id, &report).await?;

    info!("Log report for message {} sent.", message.message_id);

    Ok(())
}

/// Plain-text report: chat, author, content and bot identity.
pub fn format_report(message: &IncomingMessage, bot_user_id: u64, bot_username: &str) -> String {
    let report = format!(
        "🤖 Лог сообщения {}\n\n{}\n{}\n{}\n\n🤖 Информация о боте:\nБот: @{}\nBot ID: {}",
        message.date.format("%H:%M:%S"),
        chat_section(message),
        user_section(message),
        message_section(message),
        bot_username,
        bot_user_id,
    );

    if report.len() <= REPORT_LIMIT {
        return report;
    }

    format!("{}\n... (сообщение обрезано)", truncate(&report, REPORT_LIMIT))
}

fn chat_section(message: &IncomingMessage) -> String {
    let kind = match message.chat_kind {
        ChatKind::Private => "личный",
        ChatKind::Group => "группа",
        ChatKind::Supergroup => "супергруппа",
        ChatKind::Channel => "канал",
    };

    let title = message.chat_title.as_deref().filter(|t| !t.is_empty()).unwrap_or("Без названия");

    format!("💬 Чат: {}\n📌 Тип: {}\n🆔 ID: {}", title, kind, message.chat_id)
}

fn user_section(message: &IncomingMessage) -> String {
    // Channel posts carry no author.
    if message.user_id == 0 {
        return "👤 Пользователь: Неизвестен".to_string();
    }

    let name = match message.user_name.trim() {
        "" => "Без имени",
        name => name,
    };
    let username = message.user_username.as_deref().unwrap_or("без username");

    format!("👤 Пользователь: {}\n🔗 @{}\n🆔 ID: {}", name, username, message.user_id)
}

fn message_section(message: &IncomingMessage) -> String {
    let content = match (message.text(), message.kind) {
        (Some(text), _) => text.to_string(),
        (None, MessageKind::Sticker) => format!("🎭 Стикер: {}", message.sticker_emoji.as_deref().unwrap_or_default()),
        (None, MessageKind::Photo) => "🖼️ Фото".to_string(),
        (None, MessageKind::Document) => format!("📄 Документ: {}", message.document_name.as_deref().unwrap_or_default()),
        (None, _) => "⚠️ Без текста".to_string(),
    };

    let mut section = format!("📝 Сообщение:\n{}", content);

    if message.reply_to_message_id.is_some() {
        let quoted = match message.reply_to_text.as_deref().filter(|t| !t.is_empty()) {
            Some(text) if text.len() > REPLY_QUOTE_LIMIT => format!("{}...", truncate(text, REPLY_QUOTE_LIMIT)),
            Some(text) => text.to_string(),
            None => "⬆️ (сообщение без текста)".to_string(),
        };

        section.push_str(&format!("\n\n↩️ Ответ на:\n{}", quoted));
    }

    section
}

/// Longest prefix of `text` that fits in `limit` bytes without splitting a character.
fn truncate(text: &str, limit: usize) -> &str {
    let mut end = limit.min(text.len());

    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn message(text: Option<&str>) -> IncomingMessage {
        IncomingMessage {
            chat_id: -100,
            chat_title: Some("Беседка".to_string()),
            chat_kind: ChatKind::Supergroup,
            message_id: 5,
            user_id: 7,
            user_name: "Иван Петров".to_string(),
            user_username: Some("ivan".to_string()),
            text: text.map(str::to_string),
            kind: MessageKind::Text,
            sticker_file_id: None,
            sticker_emoji: None,
            document_name: None,
            reply_to_message_id: None,
            reply_to_user_id: None,
            reply_to_text: None,
            date: Utc.with_ymd_and_hms(2025, 1, 2, 13, 4, 5).unwrap(),
        }
    }

    #[test]
    fn test_report_lists_chat_user_message_and_bot() {
        let report = format_report(&message(Some("привет")), 1, "trigger_bot");

        assert!(report.starts_with("🤖 Лог сообщения 13:04:05"));
        assert!(report.contains("💬 Чат: Беседка\n📌 Тип: супергруппа\n🆔 ID: -100"));
        assert!(report.contains("👤 Пользователь: Иван Петров\n🔗 @ivan\n🆔 ID: 7"));
        assert!(report.contains("📝 Сообщение:\nпривет"));
        assert!(report.ends_with("Бот: @trigger_bot\nBot ID: 1"));
    }

    #[test]
    fn test_report_describes_non_text_content() {
        let mut sticker = message(None);
        sticker.kind = MessageKind::Sticker;
        sticker.sticker_emoji = Some("🦫".to_string());

        assert!(format_report(&sticker, 1, "b").contains("🎭 Стикер: 🦫"));
        assert!(format_report(&message(None), 1, "b").contains("⚠️ Без текста"));
    }

    #[test]
    fn test_report_quotes_reply_shortened() {
        let mut reply = message(Some("да"));
        reply.reply_to_message_id = Some(4);
        reply.reply_to_text = Some("ж".repeat(80));

        let report = format_report(&reply, 1, "b");

        assert!(report.contains(&format!("↩️ Ответ на:\n{}...", "ж".repeat(50))));
    }

    #[test]
    fn test_long_report_is_capped() {
        let report = format_report(&message(Some(&"щ".repeat(3000))), 1, "b");

        assert!(report.ends_with("\n... (сообщение обрезано)"));
        assert!(report.len() <= REPORT_LIMIT + "\n... (сообщение обрезано)".len());
    }
}
