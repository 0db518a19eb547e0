use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

/// Prefix on a stored response value that asks for a sticker before the text.
pub const STICKER_MARKER: &str = "STICKER:";

/// The one sticker the bot knows how to send.
pub const STICKER_ID: &str = "CAACAgIAAxkBAANTaUVkrWrIsoO8kVNAifaUqz16ex4AAqqFAAJVF1hIHdoBVVf89Yg2BA";

// Triggers.

/// A stored trigger phrase and the response it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEntry {
    /// Normalized (trimmed, lowercase) trigger text.
    pub key: String,
    /// Response value, optionally prefixed with [`STICKER_MARKER`].
    pub value: String,
}

impl TriggerEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}

/// What the bot sends back for a single match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsePayload {
    Text(String),
    /// Sticker first, then `text` unless it is empty.
    StickerPlusText { sticker_id: String, text: String },
}

impl ResponsePayload {
    /// Parses a stored response value, honoring the sticker marker.
    pub fn from_stored_value(value: &str) -> Self {
        match value.strip_prefix(STICKER_MARKER) {
            Some(text) => Self::StickerPlusText {
                sticker_id: STICKER_ID.to_string(),
                text: text.to_string(),
            },
            None => Self::Text(value.to_string()),
        }
    }

    /// The text part of the payload, if there is any to send.
    pub fn text(&self) -> Option<&str> {
        let text = match self {
            Self::Text(text) => text,
            Self::StickerPlusText { text, .. } => text,
        };

        (!text.is_empty()).then_some(text.as_str())
    }

    pub fn sticker_id(&self) -> Option<&str> {
        match self {
            Self::Text(_) => None,
            Self::StickerPlusText { sticker_id, .. } => Some(sticker_id),
        }
    }
}

/// Per-message decision of the trigger matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchDecision {
    NoMatch,
    SingleMatch(ResponsePayload),
    /// Two or more triggers matched; the bot stays silent.
    Ambiguous,
}

impl MatchDecision {
    pub fn payload(&self) -> Option<&ResponsePayload> {
        match self {
            Self::SingleMatch(payload) => Some(payload),
            _ => None,
        }
    }
}

// Inbound messages.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Text,
    Sticker,
    Photo,
    Document,
    Other,
}

/// Platform-neutral view of an inbound chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub chat_id: i64,
    pub chat_title: Option<String>,
    pub chat_kind: ChatKind,
    pub message_id: i32,
    pub user_id: u64,
    /// First and last name joined by a space.
    pub user_name: String,
    pub user_username: Option<String>,
    pub text: Option<String>,
    pub kind: MessageKind,
    pub sticker_file_id: Option<String>,
    pub sticker_emoji: Option<String>,
    pub document_name: Option<String>,
    pub reply_to_message_id: Option<i32>,
    pub reply_to_user_id: Option<u64>,
    pub reply_to_text: Option<String>,
    pub date: DateTime<Utc>,
}

impl IncomingMessage {
    /// Non-empty message text.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    pub fn is_command(&self) -> bool {
        self.text().is_some_and(|t| t.starts_with('/'))
    }
}
