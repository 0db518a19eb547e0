//! Error kinds surfaced by the trigger core.

use std::time::Duration;

/// Failure of a trigger operation.
///
/// None of these are fatal; callers decide how to degrade.
#[derive(Debug, thiserror::Error)]
pub enum TriggerError {
    #[error("trigger key must not be empty")]
    InvalidKey,

    #[error("trigger `{0}` not found")]
    NotFound(String),

    #[error("phrase store failed: {0}")]
    Store(#[source] anyhow::Error),

    #[error("phrase store did not answer within {0:?}")]
    StoreUnavailable(Duration),
}

impl TriggerError {
    /// Whether the store could not be consulted at all.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::Store(_) | Self::StoreUnavailable(_))
    }
}
