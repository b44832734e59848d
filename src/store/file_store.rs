//! File Store
//!
//! Durable store keeping one `<key>.json` file per key under a data
//! directory. Writes replace the whole file, mirroring the wholesale
//! key rewrites of the browser store this layout descends from.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;
use tokio::fs;

use crate::domain::{DomainError, DomainResult};
use super::traits::StoreBackend;

/// Directory-backed store
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub async fn open(dir: impl AsRef<Path>) -> DomainResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| DomainError::Storage(format!("create {}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl StoreBackend for FileStore {
    async fn read_key(&self, key: &str) -> DomainResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::Storage(format!(
                "read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn write_key(&self, key: &str, payload: &str) -> DomainResult<()> {
        let path = self.path_for(key);
        fs::write(&path, payload)
            .await
            .map_err(|e| DomainError::Storage(format!("write {}: {}", path.display(), e)))?;
        debug!("wrote {} bytes to {}", payload.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        assert_eq!(store.read_key("customers").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_then_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::open(dir.path()).await.unwrap();
            store.write_key("fields", "[{\"id\":\"a\"}]").await.unwrap();
        }
        let store = FileStore::open(dir.path()).await.unwrap();
        assert_eq!(
            store.read_key("fields").await.unwrap(),
            Some("[{\"id\":\"a\"}]".to_string())
        );
    }
}
