//! In-Memory Store
//!
//! HashMap-backed store for tests and ephemeral sessions, the moral
//! equivalent of the file store's `:memory:` mode.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::DomainResult;
use super::traits::StoreBackend;

/// Volatile store; contents die with the process
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoreBackend for MemoryStore {
    async fn read_key(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn write_key(&self, key: &str, payload: &str) -> DomainResult<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }
}
