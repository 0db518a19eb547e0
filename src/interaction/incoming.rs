//! Routing of every inbound message.

use tracing::{debug, instrument};

use crate::{
    base::{config::Config, types::IncomingMessage},
    service::{chat::ChatClient, db::DbClient},
    trigger::{admin::AdminService, matcher::TriggerMatcher},
};

use super::{command_event, log_report, message_storage, operator_forward, trigger_event};

/// Handles an inbound message from the chat platform.
///
/// Every message is stored, forwarded to the operator chat and reported to the
/// log chat (when those are configured). Text messages
/// then go either to command dispatch or to the trigger matcher. All work is
/// spawned, so this returns immediately.
#[instrument(skip_all, fields(chat_id = message.chat_id, message_id = message.message_id))]
pub fn handle_incoming_message(message: IncomingMessage, config: Config, db: DbClient, chat: ChatClient) {
    // Never react to our own messages.
    if message.user_id == chat.bot_user_id() {
        debug!("Skipping message authored by the bot.");
        return;
    }

    debug!(
        user_id = message.user_id,
        user_name = %message.user_name,
        user_username = ?message.user_username,
        chat_title = ?message.chat_title,
        chat_kind = ?message.chat_kind,
        kind = ?message.kind,
        text = ?message.text,
        reply_to = ?message.reply_to_message_id,
        date = %message.date,
        "Incoming message."
    );

    message_storage::handle_message_storage(message.clone(), chat.bot_user_id(), chat.bot_username(), db.clone());

    if let Some(operator_chat_id) = config.operator_chat_id {
        operator_forward::handle_operator_forward(message.clone(), operator_chat_id, chat.clone());
    }

    if let Some(log_chat_id) = config.log_chat_id {
        log_report::handle_log_report(message.clone(), log_chat_id, chat.clone());
    }

    if message.text().is_none() {
        return;
    }

    if message.is_command() {
        let admin = AdminService::new(db, config.db_timeout());
        command_event::handle_command_event(message, config, admin, chat);
    } else {
        let matcher = TriggerMatcher::new(db, config.db_timeout());
        trigger_event::handle_trigger_event(message, matcher, chat);
    }
}
