//! Library root for `trigger-bot`.
//!
//! Trigger-bot is a Telegram bot that answers operator-curated phrases:
//! - Replies when a message contains exactly one known trigger phrase
//! - Stays silent when several triggers match
//! - Sends a sticker for one hard-coded token
//! - Logs every message to the database and forwards it to an operator chat
//!
//! The bot integrates with Telegram for chat and SurrealDB for storage.
//! The architecture is built around extensible traits that allow for
//! different implementations of each service.

pub mod base;
pub mod interaction;
pub mod runtime;
pub mod service;
pub mod trigger;

use anyhow::anyhow;
use base::{config::Config, types::Void};
use rustls::crypto;
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the trigger-bot runtime:
/// - Initializes the crypto provider
/// - Creates the runtime context with database and chat clients
/// - Starts the main event loop for processing messages
pub async fn start(config: Config) -> Void {
    info!("Starting trigger-bot ...");

    // Start the crypto provider.
    crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("A crypto provider was already installed."))?;

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config).await?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
