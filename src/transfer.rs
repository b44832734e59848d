//! Export / Import
//!
//! Whole-database transfer as one JSON document with the three data
//! collections as top-level keys. Import is validated for shape and for
//! aggregate size against the storage quota, then written straight to
//! the store keys, bypassing the live collections; the caller reopens
//! the tracker to pick the new state up. Per-record contents are
//! accepted as-is.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Customer, DomainError, DomainResult, FieldDefinition, PrintTemplate};
use crate::repository::{CUSTOMERS_KEY, FIELDS_KEY, TEMPLATES_KEY};
use crate::store::StoreBackend;

/// Fixed quota the local store is sized for
pub const STORAGE_QUOTA_BYTES: u64 = 50 * 1024 * 1024;

/// Keys carried by an export document
pub const EXPORT_KEYS: [&str; 3] = [CUSTOMERS_KEY, FIELDS_KEY, TEMPLATES_KEY];

/// The three data collections as one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportBundle {
    pub customers: Vec<Customer>,
    pub fields: Vec<FieldDefinition>,
    pub templates: Vec<PrintTemplate>,
}

/// Bytes in use under the data keys, against the fixed quota
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StorageUsage {
    pub used: u64,
    pub quota: u64,
}

/// Serialize a bundle the way the download endpoint offers it
pub fn export_json(bundle: &ExportBundle) -> DomainResult<String> {
    serde_json::to_string_pretty(bundle)
        .map_err(|e| DomainError::Storage(format!("serialize export: {}", e)))
}

/// Validate an uploaded document and overwrite the three store keys
///
/// Rejections (parse failure, missing key, over quota) leave the store
/// untouched. Accepted payloads are written without per-record checks.
pub async fn import_json(store: &dyn StoreBackend, payload: &str) -> DomainResult<()> {
    let document: Value = serde_json::from_str(payload)
        .map_err(|e| DomainError::ImportRejected(format!("not valid JSON: {}", e)))?;

    for key in EXPORT_KEYS {
        if document.get(key).is_none() {
            return Err(DomainError::ImportRejected(format!(
                "missing top-level key '{}'",
                key
            )));
        }
    }

    let size = serde_json::to_string(&document)
        .map_err(|e| DomainError::ImportRejected(format!("unserializable payload: {}", e)))?
        .len() as u64;
    if size > STORAGE_QUOTA_BYTES {
        return Err(DomainError::ImportRejected(format!(
            "{} bytes exceed the {} byte quota",
            size, STORAGE_QUOTA_BYTES
        )));
    }

    for key in EXPORT_KEYS {
        let collection = serde_json::to_string(&document[key])
            .map_err(|e| DomainError::ImportRejected(format!("unserializable '{}': {}", key, e)))?;
        store.write_key(key, &collection).await?;
    }
    log::info!("imported {} bytes across {} keys", size, EXPORT_KEYS.len());
    Ok(())
}

/// Bytes currently stored under the three data keys
pub async fn storage_usage(store: &dyn StoreBackend) -> DomainResult<StorageUsage> {
    let mut used = 0u64;
    for key in EXPORT_KEYS {
        if let Some(payload) = store.read_key(key).await? {
            used += payload.len() as u64;
        }
    }
    Ok(StorageUsage {
        used,
        quota: STORAGE_QUOTA_BYTES,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreBackend};

    #[tokio::test]
    async fn test_import_rejects_garbage_without_writing() {
        let store = MemoryStore::new();
        let result = import_json(&store, "{not json").await;
        assert!(matches!(result, Err(DomainError::ImportRejected(_))));
        assert_eq!(store.read_key(CUSTOMERS_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_import_rejects_missing_key() {
        let store = MemoryStore::new();
        let result = import_json(&store, r#"{"customers": [], "fields": []}"#).await;
        assert!(matches!(result, Err(DomainError::ImportRejected(_))));
        assert_eq!(store.read_key(FIELDS_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_import_overwrites_all_three_keys() {
        let store = MemoryStore::new();
        import_json(
            &store,
            r#"{"customers": [], "fields": [], "templates": []}"#,
        )
        .await
        .unwrap();
        for key in EXPORT_KEYS {
            assert_eq!(store.read_key(key).await.unwrap(), Some("[]".to_string()));
        }
    }

    #[tokio::test]
    async fn test_import_takes_records_as_is() {
        // No per-record validation: unknown shapes are stored verbatim.
        let store = MemoryStore::new();
        import_json(
            &store,
            r#"{"customers": [{"anything": true}], "fields": [], "templates": []}"#,
        )
        .await
        .unwrap();
        assert_eq!(
            store.read_key(CUSTOMERS_KEY).await.unwrap(),
            Some(r#"[{"anything":true}]"#.to_string())
        );
    }

    #[tokio::test]
    async fn test_usage_counts_stored_bytes() {
        let store = MemoryStore::new();
        store.write_key(CUSTOMERS_KEY, "[]").await.unwrap();
        store.write_key(FIELDS_KEY, "[1,2]").await.unwrap();

        let usage = storage_usage(&store).await.unwrap();
        assert_eq!(usage.used, 7);
        assert_eq!(usage.quota, STORAGE_QUOTA_BYTES);
    }
}
