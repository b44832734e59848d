//! Customer Tracking Core
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - store: String-keyed persistence seam and backends
//! - repository: One manager per persisted collection
//! - session: Auxiliary UI-session keys
//! - transfer: Whole-database export/import
//!
//! Everything hangs off one injected [`store::StoreBackend`]; swap the
//! backend and nothing above it changes.

use std::path::Path;
use std::sync::Arc;

pub mod domain;
pub mod repository;
pub mod session;
pub mod store;
pub mod transfer;

use domain::{Customer, CustomerDraft, DomainResult};
use repository::{ChecklistRepository, CustomerRepository, FieldRepository, TemplateRepository};
use session::SessionPrefs;
use store::{FileStore, StoreBackend};
use transfer::{ExportBundle, StorageUsage};

/// Application state shared across the presentation layer
///
/// Opens every repository over one store and carries the operations that
/// span collections.
pub struct TrackerState {
    pub customers: CustomerRepository,
    pub fields: FieldRepository,
    pub templates: TemplateRepository,
    pub checklists: ChecklistRepository,
    pub session: SessionPrefs,
    store: Arc<dyn StoreBackend>,
}

impl TrackerState {
    /// Open every collection over the given store, seeding absent keys
    pub async fn open(store: Arc<dyn StoreBackend>) -> DomainResult<Self> {
        Ok(Self {
            customers: CustomerRepository::load(store.clone()).await?,
            fields: FieldRepository::load(store.clone()).await?,
            templates: TemplateRepository::load(store.clone()).await?,
            checklists: ChecklistRepository::load(store.clone()).await?,
            session: SessionPrefs::new(store.clone()),
            store,
        })
    }

    /// Open over a file store rooted at `dir`
    pub async fn open_dir(dir: impl AsRef<Path>) -> DomainResult<Self> {
        let store = Arc::new(FileStore::open(dir).await?);
        Self::open(store).await
    }

    /// Create a customer, checking uniqueness against the live field
    /// registry
    pub async fn create_customer(&self, draft: CustomerDraft) -> DomainResult<Customer> {
        let active_fields = self.fields.list().await;
        self.customers.create(draft, &active_fields).await
    }

    /// One pretty-printed JSON document with all three data collections
    pub async fn export_json(&self) -> DomainResult<String> {
        let bundle = ExportBundle {
            customers: self.customers.list().await,
            fields: self.fields.list().await,
            templates: self.templates.list().await,
        };
        transfer::export_json(&bundle)
    }

    /// Validate and write an uploaded document straight to the store
    ///
    /// The live collections keep their pre-import state; reopen the
    /// tracker over the same store to pick the imported data up.
    pub async fn import_json(&self, payload: &str) -> DomainResult<()> {
        transfer::import_json(self.store.as_ref(), payload).await
    }

    /// Bytes stored under the data keys against the fixed quota
    pub async fn storage_usage(&self) -> DomainResult<StorageUsage> {
        transfer::storage_usage(self.store.as_ref()).await
    }
}
