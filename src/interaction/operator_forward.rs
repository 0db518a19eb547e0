//! Copies every inbound message to the operator chat.

use tracing::{Instrument, error, info, instrument, warn};

use crate::{
    base::types::{IncomingMessage, Void},
    service::chat::ChatClient,
};

/// Handles forwarding a message to the operator chat.
///
/// It spawns a new task to handle the event asynchronously.
#[instrument(skip_all)]
pub fn handle_operator_forward(message: IncomingMessage, operator_chat_id: i64, chat: ChatClient) {
    tokio::spawn(
        async move {
            let result = handle_operator_forward_internal(&message, operator_chat_id, &chat).await;

            if let Err(err) = &result {
                error!("Error while forwarding to the operator chat: {}", err);
            }
        }
        .in_current_span(),
    );
}

/// Forwards the message, falling back to a copy when forwarding is refused.
#[instrument(skip(message, chat))]
async fn handle_operator_forward_internal(message: &IncomingMessage, operator_chat_id: i64, chat: &ChatClient) -> Void {
    let Err(err) = chat.forward_message(operator_chat_id, message.chat_id, message.message_id).await else {
        info!("Message {} forwarded to chat {}.", message.message_id, operator_chat_id);
        return Ok(());
    };

    warn!("Forwarding message {} from chat {} failed, sending a copy: {}", message.message_id, message.chat_id, err);

    if let Some(text) = message.text() {
        chat.send_text(operator_chat_id, &copy_text(message, text)).await?;
    } else if let Some(sticker_id) = &message.sticker_file_id {
        chat.send_sticker(operator_chat_id, sticker_id).await?;
    }

    Ok(())
}

/// Text of the fallback copy.
fn copy_text(message: &IncomingMessage, text: &str) -> String {
    match &message.user_username {
        Some(username) => format!("📨 От {} (@{}): {}", message.user_name, username, text),
        None => format!("📨 От {}: {}", message.user_name, text),
    }
}
