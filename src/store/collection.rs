//! Persisted Collection
//!
//! The persistence adapter every repository sits on: loads its named key
//! once at open, keeps the live sequence in memory behind an async RwLock,
//! and rewrites the whole key after every successful mutation. Nothing
//! above this type touches the store for the same collection.

use std::sync::Arc;

use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::domain::{DomainError, DomainResult, Entity};
use super::traits::StoreBackend;

/// One named, ordered, durably-backed sequence of records
pub struct PersistedCollection<T> {
    key: &'static str,
    records: RwLock<Vec<T>>,
    store: Arc<dyn StoreBackend>,
}

impl<T> PersistedCollection<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Load the collection stored under `key`, seeding (and persisting the
    /// seed) when the key is absent
    pub async fn load(
        store: Arc<dyn StoreBackend>,
        key: &'static str,
        seed: Vec<T>,
    ) -> DomainResult<Self> {
        let records = match store.read_key(key).await? {
            Some(payload) => serde_json::from_str::<Vec<T>>(&payload)
                .map_err(|e| DomainError::Storage(format!("parse key '{}': {}", key, e)))?,
            None => {
                let payload = serde_json::to_string(&seed)
                    .map_err(|e| DomainError::Storage(format!("serialize key '{}': {}", key, e)))?;
                store.write_key(key, &payload).await?;
                seed
            }
        };
        info!("loaded {} record(s) under key '{}'", records.len(), key);
        Ok(Self {
            key,
            records: RwLock::new(records),
            store,
        })
    }

    /// Run a read-only closure over the live sequence
    pub async fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[T]) -> R,
    {
        let guard = self.records.read().await;
        f(&guard)
    }

    /// Clone of the live sequence, the consumer-facing view
    pub async fn snapshot(&self) -> Vec<T> {
        self.records.read().await.clone()
    }

    /// Run a mutating closure, then rewrite the backing key
    ///
    /// The closure must validate before touching the sequence: when it
    /// returns an error nothing is persisted.
    pub async fn mutate<F, R>(&self, f: F) -> DomainResult<R>
    where
        F: FnOnce(&mut Vec<T>) -> DomainResult<R>,
    {
        let mut guard = self.records.write().await;
        let result = f(&mut guard)?;
        let payload = serde_json::to_string(&*guard)
            .map_err(|e| DomainError::Storage(format!("serialize key '{}': {}", self.key, e)))?;
        self.store.write_key(self.key, &payload).await?;
        Ok(result)
    }
}

impl<T> PersistedCollection<T>
where
    T: Entity + Serialize + DeserializeOwned,
{
    /// Record with the given id, if any
    pub async fn find_by_id(&self, id: &str) -> Option<T> {
        self.read(|records| records.iter().find(|r| r.id() == id).cloned())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_seed_is_persisted_on_first_load() {
        let store = Arc::new(MemoryStore::new());
        let collection: PersistedCollection<String> =
            PersistedCollection::load(store.clone(), "things", vec!["seed".to_string()])
                .await
                .unwrap();

        assert_eq!(collection.snapshot().await, vec!["seed".to_string()]);
        assert_eq!(
            store.read_key("things").await.unwrap(),
            Some("[\"seed\"]".to_string())
        );
    }

    #[tokio::test]
    async fn test_mutation_rewrites_key() {
        let store = Arc::new(MemoryStore::new());
        let collection: PersistedCollection<u32> =
            PersistedCollection::load(store.clone(), "numbers", Vec::new())
                .await
                .unwrap();

        collection
            .mutate(|records| {
                records.push(7);
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(
            store.read_key("numbers").await.unwrap(),
            Some("[7]".to_string())
        );
    }

    #[tokio::test]
    async fn test_failed_mutation_persists_nothing() {
        let store = Arc::new(MemoryStore::new());
        let collection: PersistedCollection<u32> =
            PersistedCollection::load(store.clone(), "numbers", Vec::new())
                .await
                .unwrap();

        let result: DomainResult<()> = collection
            .mutate(|_| Err(DomainError::InvalidInput("nope".to_string())))
            .await;
        assert!(result.is_err());
        assert_eq!(
            store.read_key("numbers").await.unwrap(),
            Some("[]".to_string())
        );
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_a_storage_error() {
        let store = Arc::new(MemoryStore::new());
        store.write_key("numbers", "not json").await.unwrap();

        let result = PersistedCollection::<u32>::load(store, "numbers", Vec::new()).await;
        assert!(matches!(result, Err(DomainError::Storage(_))));
    }
}
