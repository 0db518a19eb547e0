//! Telegram implementation of the chat client, backed by teloxide long polling.

use std::sync::Arc;

use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{Chat, InputFile, MessageId},
};
use tracing::{info, instrument};

use crate::{
    base::{
        config::Config,
        types::{ChatKind, IncomingMessage, MessageKind, Res, Void},
    },
    interaction,
    service::db::DbClient,
};

use super::{ChatClient, GenericChatClient};

// Extra methods on `ChatClient` applied by the telegram implementation.

impl ChatClient {
    /// Creates a new Telegram chat client.
    pub async fn telegram(config: &Config, db: DbClient) -> Res<Self> {
        let client = TelegramChatClient::new(config, db).await?;
        Ok(Self { inner: Arc::new(client) })
    }
}

impl From<TelegramChatClient> for ChatClient {
    fn from(client: TelegramChatClient) -> Self {
        Self { inner: Arc::new(client) }
    }
}

// Structs.

/// User state shared with every update handler.
struct TelegramUserState {
    config: Config,
    db: DbClient,
    chat: ChatClient,
}

/// Telegram client implementation.
#[derive(Clone)]
pub struct TelegramChatClient {
    bot: Bot,
    bot_user_id: u64,
    bot_username: String,
    config: Config,
    db: DbClient,
}

impl TelegramChatClient {
    /// Create a new Telegram chat client.
    #[instrument(name = "TelegramChatClient::new", skip_all)]
    pub async fn new(config: &Config, db: DbClient) -> Res<Self> {
        let bot = Bot::new(&config.telegram_bot_token);

        // Get the bot's user ID.

        let me = bot.get_me().await?;
        let bot_user_id = me.user.id.0;
        let bot_username = me.username().to_string();

        info!("Telegram bot authenticated as @{} ({}).", bot_username, bot_user_id);

        Ok(Self {
            bot,
            bot_user_id,
            bot_username,
            config: config.clone(),
            db,
        })
    }
}

#[async_trait]
impl GenericChatClient for TelegramChatClient {
    fn bot_user_id(&self) -> u64 {
        self.bot_user_id
    }

    fn bot_username(&self) -> String {
        self.bot_username.clone()
    }

    async fn start(&self) -> Void {
        let state = Arc::new(TelegramUserState {
            config: self.config.clone(),
            db: self.db.clone(),
            chat: ChatClient::from(self.clone()),
        });

        let handler = dptree::entry()
            .branch(Update::filter_message().endpoint(handle_message_update))
            .branch(Update::filter_edited_message().endpoint(handle_message_update))
            .branch(Update::filter_channel_post().endpoint(handle_message_update));

        info!("Starting Telegram long polling ...");

        // Runs until Ctrl-C.
        Dispatcher::builder(self.bot.clone(), handler)
            .dependencies(dptree::deps![state])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn send_text(&self, chat_id: i64, text: &str) -> Void {
        self.bot
            .send_message(ChatId(chat_id), text.to_string())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send message: {}", e))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn send_sticker(&self, chat_id: i64, sticker_id: &str) -> Void {
        self.bot
            .send_sticker(ChatId(chat_id), InputFile::file_id(sticker_id.to_string()))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send sticker: {}", e))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn forward_message(&self, to_chat_id: i64, from_chat_id: i64, message_id: i32) -> Void {
        self.bot
            .forward_message(ChatId(to_chat_id), ChatId(from_chat_id), MessageId(message_id))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to forward message: {}", e))?;

        Ok(())
    }
}

// Update handlers.

/// Handles message, edited message, and channel post updates.
#[instrument(skip_all, fields(chat_id = msg.chat.id.0, message_id = msg.id.0))]
async fn handle_message_update(msg: Message, state: Arc<TelegramUserState>) -> ResponseResult<()> {
    let message = incoming_message(&msg);

    interaction::incoming::handle_incoming_message(message, state.config.clone(), state.db.clone(), state.chat.clone());

    Ok(())
}

// Conversions.

/// Builds the platform-neutral view of a Telegram message.
fn incoming_message(msg: &Message) -> IncomingMessage {
    let from = msg.from.as_ref();
    let reply = msg.reply_to_message();
    let sticker = msg.sticker();

    let kind = if sticker.is_some() {
        MessageKind::Sticker
    } else if msg.photo().is_some() {
        MessageKind::Photo
    } else if msg.document().is_some() {
        MessageKind::Document
    } else if msg.text().is_some() {
        MessageKind::Text
    } else {
        MessageKind::Other
    };

    IncomingMessage {
        chat_id: msg.chat.id.0,
        chat_title: chat_title(&msg.chat),
        chat_kind: chat_kind(&msg.chat),
        message_id: msg.id.0,
        user_id: from.map(|u| u.id.0).unwrap_or_default(),
        user_name: from.map(|u| u.full_name()).unwrap_or_default(),
        user_username: from.and_then(|u| u.username.clone()),
        text: msg.text().map(str::to_string),
        kind,
        sticker_file_id: sticker.map(|s| s.file.id.to_string()),
        sticker_emoji: sticker.and_then(|s| s.emoji.clone()),
        document_name: msg.document().and_then(|d| d.file_name.clone()),
        reply_to_message_id: reply.map(|r| r.id.0),
        reply_to_user_id: reply.and_then(|r| r.from.as_ref()).map(|u| u.id.0),
        reply_to_text: reply.and_then(|r| r.text()).map(str::to_string),
        date: msg.date,
    }
}

fn chat_kind(chat: &Chat) -> ChatKind {
    if chat.is_channel() {
        ChatKind::Channel
    } else if chat.is_supergroup() {
        ChatKind::Supergroup
    } else if chat.is_group() {
        ChatKind::Group
    } else {
        ChatKind::Private
    }
}

/// Group title, or the peer's name in private chats.
fn chat_title(chat: &Chat) -> Option<String> {
    if let Some(title) = chat.title() {
        return Some(title.to_string());
    }

    let name = [chat.first_name(), chat.last_name()].into_iter().flatten().collect::<Vec<_>>().join(" ");

    (!name.is_empty()).then_some(name)
}
