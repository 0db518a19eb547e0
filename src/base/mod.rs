//! Core components, types, and utilities for the trigger-bot.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - Fixed replies sent to users.
//! - Common types, errors, and result handling.

pub mod config;
pub mod error;
pub mod replies;
pub mod types;
