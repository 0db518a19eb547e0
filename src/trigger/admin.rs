//! Operator-facing mutations and views of the phrase store.

use std::time::Duration;

use tracing::{info, instrument};

use crate::{
    base::{error::TriggerError, types::TriggerEntry},
    service::db::DbClient,
};

use super::within_deadline;

/// Normalizes a trigger key: trimmed and lowercase.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Validates operator input and passes it through to the phrase store.
///
/// The store starts empty; every entry comes from [`AdminService::add`].
#[derive(Clone)]
pub struct AdminService {
    db: DbClient,
    timeout: Duration,
}

impl AdminService {
    pub fn new(db: DbClient, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    /// Inserts or replaces the trigger, returning the stored entry.
    #[instrument(name = "AdminService::add", skip(self))]
    pub async fn add(&self, key: &str, value: &str) -> Result<TriggerEntry, TriggerError> {
        let key = normalize_key(key);

        if key.is_empty() {
            return Err(TriggerError::InvalidKey);
        }

        let entry = within_deadline(self.timeout, self.db.upsert_trigger(&key, value)).await?;

        info!("Added trigger `{}`.", entry.key);

        Ok(entry)
    }

    /// Deletes the trigger, returning its normalized key.
    #[instrument(name = "AdminService::remove", skip(self))]
    pub async fn remove(&self, key: &str) -> Result<String, TriggerError> {
        let key = normalize_key(key);

        if key.is_empty() {
            return Err(TriggerError::NotFound(key));
        }

        if !within_deadline(self.timeout, self.db.delete_trigger(&key)).await? {
            return Err(TriggerError::NotFound(key));
        }

        info!("Removed trigger `{}`.", key);

        Ok(key)
    }

    /// Every trigger, in no particular order.
    pub async fn list(&self) -> Result<Vec<TriggerEntry>, TriggerError> {
        within_deadline(self.timeout, self.db.get_all_triggers()).await
    }

    /// Triggers whose value contains `needle`, ignoring case. Keys are not searched.
    pub async fn search(&self, needle: &str) -> Result<Vec<TriggerEntry>, TriggerError> {
        let needle = needle.to_lowercase();
        let entries = self.list().await?;

        Ok(entries.into_iter().filter(|e| e.value.to_lowercase().contains(&needle)).collect())
    }

    pub async fn count(&self) -> Result<usize, TriggerError> {
        Ok(self.list().await?.len())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    use super::*;
    use crate::service::db::MockGenericDbClient;

    /// A mock store backed by a shared map.
    fn map_backed_mock() -> (MockGenericDbClient, Arc<Mutex<HashMap<String, String>>>) {
        let map = Arc::new(Mutex::new(HashMap::<String, String>::new()));
        let mut mock = MockGenericDbClient::new();

        let m = map.clone();
        mock.expect_get_all_triggers()
            .returning(move || Ok(m.lock().unwrap().iter().map(|(k, v)| TriggerEntry::new(k.clone(), v.clone())).collect()));

        let m = map.clone();
        mock.expect_upsert_trigger().returning(move |k, v| {
            m.lock().unwrap().insert(k.to_string(), v.to_string());
            Ok(TriggerEntry::new(k, v))
        });

        let m = map.clone();
        mock.expect_delete_trigger().returning(move |k| Ok(m.lock().unwrap().remove(k).is_some()));

        (mock, map)
    }

    fn service() -> (AdminService, Arc<Mutex<HashMap<String, String>>>) {
        let (mock, map) = map_backed_mock();
        (AdminService::new(DbClient::new(Arc::new(mock)), Duration::from_secs(1)), map)
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("  Привет "), "привет");
        assert_eq!(normalize_key("   "), "");
    }

    #[tokio::test]
    async fn test_add_normalizes_key() {
        let (admin, map) = service();

        let entry = admin.add("  СлАвИк ", "Славик").await.unwrap();

        assert_eq!(entry, TriggerEntry::new("славик", "Славик"));
        assert_eq!(map.lock().unwrap().get("славик").map(String::as_str), Some("Славик"));
    }

    #[tokio::test]
    async fn test_add_rejects_empty_key() {
        let (admin, map) = service();

        let err = admin.add("   ", "value").await.unwrap_err();

        assert!(matches!(err, TriggerError::InvalidKey));
        assert!(map.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_twice_upserts() {
        let (admin, _) = service();

        admin.add("k", "v").await.unwrap();
        admin.add("k", "v2").await.unwrap();

        assert_eq!(admin.list().await.unwrap(), vec![TriggerEntry::new("k", "v2")]);
        assert_eq!(admin.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_add_then_remove_round_trip() {
        let (admin, _) = service();

        admin.add("привет", "Hi").await.unwrap();
        let removed = admin.remove("ПРИВЕТ").await.unwrap();

        assert_eq!(removed, "привет");
        assert!(admin.list().await.unwrap().iter().all(|e| e.key != "привет"));
    }

    #[tokio::test]
    async fn test_remove_missing_key() {
        let (admin, _) = service();
        admin.add("есть", "value").await.unwrap();

        let err = admin.remove("нет").await.unwrap_err();

        assert!(matches!(err, TriggerError::NotFound(ref k) if k == "нет"));
        assert_eq!(admin.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_search_matches_values_only() {
        let (admin, _) = service();
        admin.add("хуже", "нейтрально").await.unwrap();
        admin.add("один", "Бывает и ХУЖЕ").await.unwrap();
        admin.add("два", "всё хуже и хуже").await.unwrap();

        let mut found: Vec<String> = admin.search("хуже").await.unwrap().into_iter().map(|e| e.key).collect();
        found.sort();

        assert_eq!(found, vec!["два".to_string(), "один".to_string()]);
    }

    #[tokio::test]
    async fn test_store_failure_is_reported() {
        let mut mock = MockGenericDbClient::new();
        mock.expect_upsert_trigger().returning(|_, _| Err(anyhow::anyhow!("disk full")));

        let admin = AdminService::new(DbClient::new(Arc::new(mock)), Duration::from_secs(1));
        let err = admin.add("k", "v").await.unwrap_err();

        assert!(matches!(err, TriggerError::Store(_)));
    }
}
