//! Service integrations for external APIs and clients.
//!
//! This module contains implementations for the services used by the trigger-bot:
//! - Chat services (e.g., Telegram)
//! - Database services (e.g., SurrealDB)
//!
//! Each service module defines both generic traits and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod chat;
pub mod db;
