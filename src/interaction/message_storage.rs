//! This module handles the storage of messages in the audit log.

use tracing::{Instrument, error, instrument};

use crate::{
    base::types::{IncomingMessage, Void},
    service::db::{DbClient, MessageLogRecord},
};

/// Handles the message storage event.
///
/// This function is responsible for writing the message to the audit log and
/// refreshing the bot's liveness record. It spawns a new task to handle the
/// event asynchronously.
#[instrument(skip_all)]
pub fn handle_message_storage(message: IncomingMessage, bot_user_id: u64, bot_username: String, db: DbClient) {
    tokio::spawn(
        async move {
            // Process the event.
            let result = handle_message_storage_internal(&message, bot_user_id, &bot_username, &db).await;

            // Log any errors.
            if let Err(err) = &result {
                error!("Error while storing message: {}", err);
            }
        }
        .in_current_span(),
    );
}

/// Internal function to handle the message storage event.
#[instrument(skip_all)]
async fn handle_message_storage_internal(message: &IncomingMessage, bot_user_id: u64, bot_username: &str, db: &DbClient) -> Void {
    let record = MessageLogRecord::from_message(bot_user_id, message);

    db.add_message_log(&record).await?;
    db.touch_bot_stats(bot_user_id, bot_username).await?;

    Ok(())
}
