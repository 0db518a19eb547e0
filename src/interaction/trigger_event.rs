//! Replies to messages that match exactly one trigger.

use tracing::{Instrument, error, info, instrument};

use crate::{
    base::types::{IncomingMessage, MatchDecision, ResponsePayload, Void},
    service::chat::ChatClient,
    trigger::matcher::TriggerMatcher,
};

/// Handles a plain (non-command) text message.
///
/// It spawns a new task to handle the event asynchronously.
#[instrument(skip_all)]
pub fn handle_trigger_event(message: IncomingMessage, matcher: TriggerMatcher, chat: ChatClient) {
    tokio::spawn(
        async move {
            // Process the event.
            let result = handle_trigger_event_internal(&message, &matcher, &chat).await;

            // Log any errors.
            if let Err(err) = &result {
                error!("Error while handling: {}", err);
            }
        }
        .in_current_span(),
    );
}

/// Matches the message and sends the payload of a single match.
///
/// A store failure is logged and answered with silence.
#[instrument(skip_all, fields(chat_id = message.chat_id, message_id = message.message_id))]
async fn handle_trigger_event_internal(message: &IncomingMessage, matcher: &TriggerMatcher, chat: &ChatClient) -> Void {
    let Some(text) = message.text() else {
        return Ok(());
    };

    let decision = match matcher.match_text(text).await {
        Ok(decision) => decision,
        Err(err) => {
            error!("Could not match message, staying silent: {}", err);
            return Ok(());
        }
    };

    match decision {
        MatchDecision::NoMatch => info!("No trigger matched."),
        MatchDecision::Ambiguous => info!("Several triggers matched, staying silent."),
        MatchDecision::SingleMatch(payload) => {
            info!("Single trigger matched, replying ...");
            send_payload(message.chat_id, &payload, chat).await?;
        }
    }

    Ok(())
}

/// Sends the sticker (if any), then the text (if non-empty).
async fn send_payload(chat_id: i64, payload: &ResponsePayload, chat: &ChatClient) -> Void {
    if let Some(sticker_id) = payload.sticker_id() {
        // The text still goes out when the sticker is rejected.
        if let Err(err) = chat.send_sticker(chat_id, sticker_id).await {
            error!("Error sending sticker: {}", err);
        }
    }

    if let Some(text) = payload.text() {
        chat.send_text(chat_id, text).await?;
    }

    Ok(())
}
