//! Trigger matching and curation.
//!
//! This module decides whether an inbound message gets a reply:
//! - `detector` recognizes the fixed special-case token.
//! - `matcher` counts every matching trigger and answers only on exactly one.
//! - `admin` validates and applies operator changes to the phrase store.
//!
//! Nothing here caches store contents; every call reads the store anew.

pub mod admin;
pub mod detector;
pub mod matcher;

use std::{future::Future, time::Duration};

use crate::base::{error::TriggerError, types::Res};

/// Awaits a store call, bounded by `limit`.
pub(crate) async fn within_deadline<T>(limit: Duration, call: impl Future<Output = Res<T>>) -> Result<T, TriggerError> {
    match tokio::time::timeout(limit, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(TriggerError::Store(err)),
        Err(_) => Err(TriggerError::StoreUnavailable(limit)),
    }
}
