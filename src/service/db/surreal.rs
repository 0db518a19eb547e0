//! SurrealDB implementation for trigger-bot data storage.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::{
    Surreal,
    engine::any::{self, Any},
    opt::auth::Root,
};
use tracing::{debug, info, instrument};

use crate::base::{
    config::Config,
    types::{Res, TriggerEntry, Void},
};

use super::{DbClient, GenericDbClient, MessageLogRecord};

const TRIGGER_TABLE: &str = "trigger_phrase";
const MESSAGE_LOG_TABLE: &str = "message_log";
const BOT_STATS_TABLE: &str = "bot_stats";

const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS trigger_phrase SCHEMALESS;
DEFINE FIELD IF NOT EXISTS trigger_text ON trigger_phrase TYPE string;
DEFINE FIELD IF NOT EXISTS response_text ON trigger_phrase TYPE string;

DEFINE TABLE IF NOT EXISTS message_log SCHEMALESS;
DEFINE INDEX IF NOT EXISTS message_log_chat_id ON message_log FIELDS chat_id;
DEFINE INDEX IF NOT EXISTS message_log_user_id ON message_log FIELDS user_id;

DEFINE TABLE IF NOT EXISTS bot_stats SCHEMALESS;
"#;

// Extra methods on `DbClient` applied by the surreal implementation.

impl DbClient {
    /// Connects to the SurrealDB endpoint named in the configuration.
    pub async fn surreal(config: &Config) -> Res<Self> {
        let client = SurrealDbClient::new(config).await?;
        Ok(Self { inner: Arc::new(client) })
    }

    /// Creates a fresh in-process database.
    pub async fn surreal_memory() -> Res<Self> {
        let client = SurrealDbClient::memory().await?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Records.

/// A trigger record in the database, keyed by its trigger text.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SurrealTrigger {
    trigger_text: String,
    response_text: String,
    updated_at: DateTime<Utc>,
}

/// Liveness record of a bot, keyed by its user ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SurrealBotStats {
    bot_user_id: u64,
    bot_username: String,
    updated_at: DateTime<Utc>,
}

impl From<SurrealTrigger> for TriggerEntry {
    fn from(record: SurrealTrigger) -> Self {
        TriggerEntry::new(record.trigger_text, record.response_text)
    }
}

// Specific implementations.

/// SurrealDB client implementation.
#[derive(Clone)]
pub struct SurrealDbClient {
    db: Surreal<Any>,
}

impl SurrealDbClient {
    /// Create a new database client.
    #[instrument(name = "SurrealDbClient::new", skip_all, fields(endpoint = %config.db_endpoint))]
    pub async fn new(config: &Config) -> Res<Self> {
        let db = any::connect(config.db_endpoint.as_str()).await?;

        // In-memory engines have no users to sign in as.
        if !config.db_endpoint.starts_with("mem://") {
            db.signin(Root {
                username: &config.db_username,
                password: &config.db_password,
            })
            .await?;
        }

        Self::initialize(db, &config.db_namespace, &config.db_database).await
    }

    /// Create an in-memory database client.
    pub async fn memory() -> Res<Self> {
        let db = any::connect("mem://").await?;

        Self::initialize(db, "trigger", "bot").await
    }

    async fn initialize(db: Surreal<Any>, namespace: &str, database: &str) -> Res<Self> {
        db.use_ns(namespace).use_db(database).await?;

        // Define schemas.

        db.query(SCHEMA).await?.check()?;

        info!("Database initialized successfully.");

        Ok(Self { db })
    }
}

#[async_trait]
impl GenericDbClient for SurrealDbClient {
    #[instrument(skip(self))]
    async fn get_all_triggers(&self) -> Res<Vec<TriggerEntry>> {
        let records: Vec<SurrealTrigger> = self.db.select(TRIGGER_TABLE).await?;

        debug!("Loaded {} triggers.", records.len());

        Ok(records.into_iter().map(TriggerEntry::from).collect())
    }

    #[instrument(skip(self))]
    async fn upsert_trigger(&self, key: &str, value: &str) -> Res<TriggerEntry> {
        let record = SurrealTrigger {
            trigger_text: key.to_string(),
            response_text: value.to_string(),
            updated_at: Utc::now(),
        };

        let stored: Option<SurrealTrigger> = self.db.upsert((TRIGGER_TABLE, key)).content(record).await?;
        let stored = stored.ok_or_else(|| anyhow::anyhow!("Upsert of trigger `{}` returned no record.", key))?;

        info!("Trigger `{}` stored.", key);

        Ok(stored.into())
    }

    #[instrument(skip(self))]
    async fn delete_trigger(&self, key: &str) -> Res<bool> {
        let removed: Option<SurrealTrigger> = self.db.delete((TRIGGER_TABLE, key)).await?;

        if removed.is_some() {
            info!("Trigger `{}` deleted.", key);
        }

        Ok(removed.is_some())
    }

    #[instrument(skip_all, fields(chat_id = record.chat_id, message_id = record.message_id))]
    async fn add_message_log(&self, record: &MessageLogRecord) -> Void {
        let _: Option<MessageLogRecord> = self.db.create(MESSAGE_LOG_TABLE).content(record.clone()).await?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn touch_bot_stats(&self, bot_user_id: u64, bot_username: &str) -> Void {
        let record = SurrealBotStats {
            bot_user_id,
            bot_username: bot_username.to_string(),
            updated_at: Utc::now(),
        };

        let _: Option<SurrealBotStats> = self.db.upsert((BOT_STATS_TABLE, bot_user_id.to_string())).content(record).await?;

        debug!("Bot stats updated for @{}.", bot_username);

        Ok(())
    }
}

// Tests.
