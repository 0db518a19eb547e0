//! Dispatch of `/command` messages.

use tracing::{Instrument, error, info, instrument, warn};

use crate::{
    base::{
        config::Config,
        replies,
        types::{IncomingMessage, Void},
    },
    service::chat::ChatClient,
    trigger::admin::AdminService,
};

use super::admin_command;

/// Splits command text into the command name and its arguments.
///
/// The name is lowercased and loses its leading `/` and any `@botname` suffix.
pub fn split_command(text: &str) -> Option<(String, &str)> {
    let text = text.trim_start().strip_prefix('/')?;
    let (head, args) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
    let name = head.split('@').next().unwrap_or_default().to_lowercase();

    Some((name, args.trim()))
}

/// Handles a command message.
///
/// It spawns a new task to handle the event asynchronously.
#[instrument(skip_all)]
pub fn handle_command_event(message: IncomingMessage, config: Config, admin: AdminService, chat: ChatClient) {
    tokio::spawn(
        async move {
            let result = handle_command_event_internal(&message, &config, &admin, &chat).await;

            if let Err(err) = &result {
                error!("Error while handling command: {}", err);
            }
        }
        .in_current_span(),
    );
}

/// Renders the reply to a command and sends it back to the chat.
#[instrument(skip_all, fields(chat_id = message.chat_id, user_id = message.user_id))]
async fn handle_command_event_internal(message: &IncomingMessage, config: &Config, admin: &AdminService, chat: &ChatClient) -> Void {
    let Some((name, args)) = message.text().and_then(split_command) else {
        return Ok(());
    };

    info!("Command received: /{}", name);

    let reply = match name.as_str() {
        "start" => replies::START_REPLY.to_string(),
        "help" => help_reply(config.is_admin(message.user_id)),
        "about" => replies::ABOUT_REPLY.to_string(),
        "admin" if config.is_admin(message.user_id) => admin_command::execute_admin_command(args, admin, config.admin_user_id).await,
        "admin" => {
            warn!("User {} is not allowed to run admin commands.", message.user_id);
            replies::ADMIN_FORBIDDEN_REPLY.to_string()
        }
        _ => replies::UNKNOWN_COMMAND_REPLY.to_string(),
    };

    chat.send_text(message.chat_id, &reply).await
}

fn help_reply(is_admin: bool) -> String {
    let mut reply = replies::HELP_REPLY.to_string();

    if is_admin {
        reply.push_str(replies::HELP_ADMIN_LINE);
    }

    reply
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_command() {
        assert_eq!(split_command("/start"), Some(("start".to_string(), "")));
        assert_eq!(split_command("/Admin add k v"), Some(("admin".to_string(), "add k v")));
        assert_eq!(split_command("/admin@trigger_bot list"), Some(("admin".to_string(), "list")));
        assert_eq!(split_command("hello"), None);
    }

    #[test]
    fn test_help_lists_admin_only_for_admin() {
        assert!(help_reply(true).contains("/admin"));
        assert!(!help_reply(false).contains("/admin"));
    }
}
