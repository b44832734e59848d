//! Store Layer - Core Trait
//!
//! Defines the string-keyed durable store seam repositories persist
//! through. Implementations can use flat files, an in-memory map, etc.

use async_trait::async_trait;

use crate::domain::DomainResult;

/// Durable string-keyed store
///
/// Each key holds one JSON payload, rewritten wholesale on every change.
/// All operations are async to support various backends.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Read the payload stored under `key`, if any
    async fn read_key(&self, key: &str) -> DomainResult<Option<String>>;

    /// Overwrite the payload stored under `key`
    async fn write_key(&self, key: &str, payload: &str) -> DomainResult<()>;
}
