//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc, time::Duration};

use serde::Deserialize;

use super::types::Res;

/// Default SurrealDB endpoint (fully in-process).
fn default_db_endpoint() -> String {
    "mem://".to_string()
}

/// Default SurrealDB namespace.
fn default_db_namespace() -> String {
    "trigger".to_string()
}

/// Default SurrealDB database.
fn default_db_database() -> String {
    "bot".to_string()
}

/// Default deadline for store calls made by the trigger core.
fn default_db_timeout_ms() -> u64 {
    5000
}

/// Configuration for the trigger-bot application.
#[derive(Debug, Clone)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// Telegram bot token (`TELEGRAM_BOT_TOKEN`).
    pub telegram_bot_token: String,
    /// User allowed to run `/admin` commands (`ADMIN_USER_ID`).
    pub admin_user_id: u64,
    /// Chat that receives a forward of every inbound message (`OPERATOR_CHAT_ID`).
    #[serde(default)]
    pub operator_chat_id: Option<i64>,
    /// Chat that receives a formatted report of every inbound message (`LOG_CHAT_ID`).
    #[serde(default)]
    pub log_chat_id: Option<i64>,
    /// Database endpoint URL (`DB_ENDPOINT`), e.g. `mem://` or `ws://localhost:8000`.
    #[serde(default = "default_db_endpoint")]
    pub db_endpoint: String,
    /// Database username (`DB_USERNAME`).
    #[serde(default)]
    pub db_username: String,
    /// Database password (`DB_PASSWORD`).
    #[serde(default)]
    pub db_password: String,
    /// Database namespace (`DB_NAMESPACE`).
    #[serde(default = "default_db_namespace")]
    pub db_namespace: String,
    /// Database name (`DB_DATABASE`).
    #[serde(default = "default_db_database")]
    pub db_database: String,
    /// Deadline in milliseconds for every phrase store call (`DB_TIMEOUT_MS`).
    #[serde(default = "default_db_timeout_ms")]
    pub db_timeout_ms: u64,
}

impl ConfigInner {
    pub fn db_timeout(&self) -> Duration {
        Duration::from_millis(self.db_timeout_ms)
    }

    pub fn is_admin(&self, user_id: u64) -> bool {
        user_id == self.admin_user_id
    }
}

impl Config {
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder();

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        cfg = cfg.add_source(config::Environment::default().prefix("TRIGGER_BOT"));

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        result.validate()?;

        Ok(result)
    }

    fn validate(&self) -> Res<()> {
        if self.telegram_bot_token.trim().is_empty() {
            return Err(anyhow::anyhow!("Telegram bot token must not be empty."));
        }

        if self.db_timeout_ms < 1 || self.db_timeout_ms > 60000 {
            return Err(anyhow::anyhow!("Database timeout must be between 1 and 60000 milliseconds."));
        }

        Ok(())
    }
}

impl From<ConfigInner> for Config {
    fn from(inner: ConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token: &str, timeout: u64) -> Config {
        Config::from(ConfigInner {
            telegram_bot_token: token.to_string(),
            admin_user_id: 42,
            db_timeout_ms: timeout,
            ..Default::default()
        })
    }

    #[test]
    fn test_validate_accepts_sane_values() {
        assert!(config("123:abc", 5000).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_token() {
        assert!(config("  ", 5000).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_timeout() {
        assert!(config("123:abc", 0).validate().is_err());
        assert!(config("123:abc", 60001).validate().is_err());
    }

    #[test]
    fn test_is_admin() {
        let config = config("123:abc", 5000);

        assert!(config.is_admin(42));
        assert!(!config.is_admin(7));
        assert_eq!(config.db_timeout(), Duration::from_millis(5000));
    }
}
