//! Decides whether a message matches exactly one trigger.

use std::time::Duration;

use tracing::{debug, instrument};

use crate::{
    base::{
        error::TriggerError,
        types::{MatchDecision, ResponsePayload},
    },
    service::db::DbClient,
};

use super::{detector, within_deadline};

/// Matches message text against the special case and every stored trigger.
///
/// Holds no state of its own besides the store handle, so it is safe to share
/// across concurrently handled messages.
#[derive(Clone)]
pub struct TriggerMatcher {
    db: DbClient,
    timeout: Duration,
}

impl TriggerMatcher {
    pub fn new(db: DbClient, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    /// Reads the current store and decides on `text`.
    ///
    /// Fails with [`TriggerError::StoreUnavailable`] when the store read exceeds
    /// the deadline, so callers can tell "no match" from "could not tell".
    #[instrument(name = "TriggerMatcher::match_text", skip_all)]
    pub async fn match_text(&self, text: &str) -> Result<MatchDecision, TriggerError> {
        if text.is_empty() {
            return Ok(MatchDecision::NoMatch);
        }

        let entries = within_deadline(self.timeout, self.db.get_all_triggers()).await?;
        let decision = decide(text, entries.iter().map(|e| (e.key.as_str(), e.value.as_str())));

        debug!("Matched against {} triggers: {:?}", entries.len(), decision);

        Ok(decision)
    }
}

/// Decides on `text` given a snapshot of `(key, value)` trigger pairs.
///
/// The special case counts as one more trigger. Exactly one match yields its
/// payload; two or more yield [`MatchDecision::Ambiguous`] no matter which.
pub fn decide<'a>(text: &str, entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> MatchDecision {
    let mut match_count = 0usize;
    let mut candidate = None;

    if detector::detect(text) {
        match_count += 1;
        candidate = Some(detector::special_payload());
    }

    let text_lower = text.to_lowercase();

    for (key, value) in entries {
        if match_count >= 2 {
            break;
        }

        // An empty key would match every message.
        if key.is_empty() || !text_lower.contains(&key.to_lowercase()) {
            continue;
        }

        match_count += 1;

        if candidate.is_none() {
            candidate = Some(ResponsePayload::from_stored_value(value));
        }
    }

    match (match_count, candidate) {
        (1, Some(payload)) => MatchDecision::SingleMatch(payload),
        (0, _) => MatchDecision::NoMatch,
        _ => MatchDecision::Ambiguous,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::base::types::{STICKER_ID, TriggerEntry};
    use crate::service::db::MockGenericDbClient;

    fn store() -> Vec<(&'static str, &'static str)> {
        vec![
            ("славик", "Славик абсолютно конченная поебота"),
            ("вася", "Вася молодец"),
            ("бобёр", "STICKER:крутой бобёр"),
        ]
    }

    fn matcher_with(entries: Vec<TriggerEntry>) -> TriggerMatcher {
        let mut mock = MockGenericDbClient::new();
        mock.expect_get_all_triggers().returning(move || Ok(entries.clone()));

        TriggerMatcher::new(DbClient::new(Arc::new(mock)), Duration::from_secs(1))
    }

    #[test]
    fn test_no_match() {
        assert_eq!(decide("добрый вечер", store()), MatchDecision::NoMatch);
        assert_eq!(decide("", store()), MatchDecision::NoMatch);
    }

    #[test]
    fn test_single_store_match() {
        let decision = decide("привет, славик, как дела", store());

        assert_eq!(decision, MatchDecision::SingleMatch(ResponsePayload::Text("Славик абсолютно конченная поебота".to_string())));
    }

    #[test]
    fn test_match_ignores_message_case() {
        let decision = decide("СЛАВИК!", store());

        assert!(matches!(decision, MatchDecision::SingleMatch(_)));
    }

    #[test]
    fn test_sticker_value_is_parsed() {
        let decision = decide("видел бобёр?", store());

        assert_eq!(
            decision,
            MatchDecision::SingleMatch(ResponsePayload::StickerPlusText {
                sticker_id: STICKER_ID.to_string(),
                text: "крутой бобёр".to_string(),
            })
        );
    }

    #[test]
    fn test_two_store_keys_are_ambiguous() {
        assert_eq!(decide("славик и вася", store()), MatchDecision::Ambiguous);
    }

    #[test]
    fn test_special_case_alone() {
        let decision = decide("ЕБ пришёл", store());

        assert_eq!(decision, MatchDecision::SingleMatch(detector::special_payload()));
    }

    #[test]
    fn test_special_case_plus_store_key_is_ambiguous() {
        assert_eq!(decide("ЕБ и славик тут", store()), MatchDecision::Ambiguous);
    }

    #[test]
    fn test_nested_keys_count_separately() {
        let entries = vec![("слав", "short"), ("славик", "long")];

        assert_eq!(decide("славик", entries.clone()), MatchDecision::Ambiguous);
        assert_eq!(decide("слава", entries), MatchDecision::SingleMatch(ResponsePayload::Text("short".to_string())));
    }

    #[test]
    fn test_iteration_order_does_not_matter() {
        let mut reversed = store();
        reversed.reverse();

        for text in ["славик", "славик и вася", "ничего", "ЕБ", "ЕБ вася"] {
            assert_eq!(decide(text, store()), decide(text, reversed.clone()), "text: {text}");
        }
    }

    #[test]
    fn test_empty_key_never_matches() {
        assert_eq!(decide("что угодно", vec![("", "always")]), MatchDecision::NoMatch);
    }

    #[tokio::test]
    async fn test_match_text_reads_store() {
        let matcher = matcher_with(vec![TriggerEntry::new("славик", "Славик абсолютно конченная поебота")]);

        let decision = matcher.match_text("привет, славик, как дела").await.unwrap();
        assert_eq!(decision.payload().and_then(|p| p.text()), Some("Славик абсолютно конченная поебота"));

        let decision = matcher.match_text("ЕБ и славик тут").await.unwrap();
        assert_eq!(decision, MatchDecision::Ambiguous);
    }

    #[tokio::test]
    async fn test_match_text_surfaces_store_errors() {
        let mut mock = MockGenericDbClient::new();
        mock.expect_get_all_triggers().returning(|| Err(anyhow::anyhow!("connection reset")));

        let matcher = TriggerMatcher::new(DbClient::new(Arc::new(mock)), Duration::from_secs(1));
        let err = matcher.match_text("славик").await.unwrap_err();

        assert!(matches!(err, TriggerError::Store(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_match_text_times_out() {
        struct SlowDb;

        #[async_trait::async_trait]
        impl crate::service::db::GenericDbClient for SlowDb {
            async fn get_all_triggers(&self) -> crate::base::types::Res<Vec<TriggerEntry>> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(vec![])
            }
            async fn upsert_trigger(&self, key: &str, value: &str) -> crate::base::types::Res<TriggerEntry> {
                Ok(TriggerEntry::new(key, value))
            }
            async fn delete_trigger(&self, _key: &str) -> crate::base::types::Res<bool> {
                Ok(false)
            }
            async fn add_message_log(&self, _record: &crate::service::db::MessageLogRecord) -> crate::base::types::Void {
                Ok(())
            }
            async fn touch_bot_stats(&self, _bot_user_id: u64, _bot_username: &str) -> crate::base::types::Void {
                Ok(())
            }
        }

        let matcher = TriggerMatcher::new(DbClient::new(Arc::new(SlowDb)), Duration::from_millis(100));
        let err = matcher.match_text("славик").await.unwrap_err();

        assert!(matches!(err, TriggerError::StoreUnavailable(_)));
        assert!(err.is_store_failure());
    }
}
