//! Chat service integration for trigger-bot.
//!
//! This module provides functionality for interacting with chat platforms like Telegram:
//! - Receiving messages
//! - Sending text and stickers
//! - Forwarding messages to the operator chat
//!
//! It defines the `GenericChatClient` trait that can be implemented for different
//! chat services, with a default implementation for Telegram.

pub mod telegram;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::Void;

// Traits.

/// Generic "chat" trait that clients must implement.
///
/// This trait defines the core functionality for interacting with chat platforms
/// like Telegram. Implementing this trait allows different chat services to be used
/// with the trigger-bot.
#[async_trait]
pub trait GenericChatClient: Send + Sync + 'static {
    /// Get the bot user ID.
    ///
    /// Messages authored by this user are never answered.
    fn bot_user_id(&self) -> u64;

    /// Get the bot username, without the leading `@`.
    fn bot_username(&self) -> String;

    /// Start the chat client listener.
    ///
    /// This sets up update listeners for the chat platform and begins processing
    /// incoming messages until shutdown.
    async fn start(&self) -> Void;

    /// Send a text message to a chat.
    async fn send_text(&self, chat_id: i64, text: &str) -> Void;

    /// Send a sticker, identified by its platform file ID, to a chat.
    async fn send_sticker(&self, chat_id: i64, sticker_id: &str) -> Void;

    /// Forward an existing message to another chat.
    async fn forward_message(&self, to_chat_id: i64, from_chat_id: i64, message_id: i32) -> Void;
}

// Structs.

/// Chat client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<dyn GenericChatClient>,
}

impl Deref for ChatClient {
    type Target = dyn GenericChatClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ChatClient {
    pub fn new(inner: Arc<dyn GenericChatClient>) -> Self {
        Self { inner }
    }
}
