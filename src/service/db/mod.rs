//! Persistence for trigger phrases and the message audit log.

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::base::types::{ChatKind, IncomingMessage, MessageKind, Res, TriggerEntry, Void};

pub mod surreal;

// Traits.

/// Generic database client trait that clients must implement.
///
/// This is both the phrase store read by the trigger core and the log store
/// written by the audit path. Implementing this trait allows different
/// database backends to be used with the trigger-bot.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenericDbClient: Send + Sync + 'static {
    /// Gets every stored trigger.
    ///
    /// The order is unspecified; each call reads the current state of the store.
    async fn get_all_triggers(&self) -> Res<Vec<TriggerEntry>>;

    /// Inserts the trigger, or replaces the value of an existing one.
    ///
    /// The key is expected to be normalized already.
    async fn upsert_trigger(&self, key: &str, value: &str) -> Res<TriggerEntry>;

    /// Deletes the trigger, returning whether it existed.
    async fn delete_trigger(&self, key: &str) -> Res<bool>;

    /// Appends an inbound message to the audit log.
    async fn add_message_log(&self, record: &MessageLogRecord) -> Void;

    /// Records that the bot is alive, keyed by its user ID.
    async fn touch_bot_stats(&self, bot_user_id: u64, bot_username: &str) -> Void;
}

// Structs.

/// Database client for trigger-bot.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct DbClient {
    inner: Arc<dyn GenericDbClient>,
}

impl Deref for DbClient {
    type Target = dyn GenericDbClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl DbClient {
    pub fn new(inner: Arc<dyn GenericDbClient>) -> Self {
        Self { inner }
    }
}

/// One audited inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLogRecord {
    pub bot_user_id: u64,
    pub chat_id: i64,
    pub chat_title: Option<String>,
    pub chat_kind: ChatKind,
    pub user_id: u64,
    pub user_name: String,
    pub user_username: Option<String>,
    pub message_id: i32,
    /// Message text; falls back to the sticker emoji or document name.
    pub message_text: Option<String>,
    pub message_kind: MessageKind,
    pub reply_to_message_id: Option<i32>,
    pub reply_to_user_id: Option<u64>,
    pub sticker_emoji: Option<String>,
    pub sent_at: DateTime<Utc>,
    pub logged_at: DateTime<Utc>,
}

impl MessageLogRecord {
    pub fn from_message(bot_user_id: u64, message: &IncomingMessage) -> Self {
        let message_text = message
            .text()
            .map(str::to_string)
            .or_else(|| match message.kind {
                MessageKind::Sticker => message.sticker_emoji.clone(),
                MessageKind::Document => message.document_name.clone(),
                _ => None,
            });

        Self {
            bot_user_id,
            chat_id: message.chat_id,
            chat_title: message.chat_title.clone(),
            chat_kind: message.chat_kind,
            user_id: message.user_id,
            user_name: message.user_name.clone(),
            user_username: message.user_username.clone(),
            message_id: message.message_id,
            message_text,
            message_kind: message.kind,
            reply_to_message_id: message.reply_to_message_id,
            reply_to_user_id: message.reply_to_user_id,
            sticker_emoji: message.sticker_emoji.clone(),
            sent_at: message.date,
            logged_at: Utc::now(),
        }
    }
}
