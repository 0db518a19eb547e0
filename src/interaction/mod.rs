//! Event handling and user interactions for trigger-bot.
//!
//! This module provides functionality for handling inbound chat messages:
//! - Routing each message to storage, operator forwarding, the log chat, and a reply path
//! - Answering unambiguous trigger matches
//! - Dispatching bot commands, including the admin phrase management

pub mod admin_command;
pub mod command_event;
pub mod incoming;
pub mod log_report;
pub mod message_storage;
pub mod operator_forward;
pub mod trigger_event;
