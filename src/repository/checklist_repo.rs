//! Checklist Template Repository
//!
//! Reusable checklists are plain positional records: append on save,
//! remove by index, no ids and no protection rules. An untitled save
//! gets a generated "Checklist Template N" title.

use std::sync::Arc;

use log::debug;

use crate::domain::{ChecklistTemplate, DomainResult};
use crate::store::{PersistedCollection, StoreBackend};

/// Store key backing the saved checklists collection
pub const SAVED_CHECKLISTS_KEY: &str = "savedChecklists";

/// Registry of reusable checklist templates
pub struct ChecklistRepository {
    records: PersistedCollection<ChecklistTemplate>,
}

impl ChecklistRepository {
    /// Load the collection; an absent key starts empty
    pub async fn load(store: Arc<dyn StoreBackend>) -> DomainResult<Self> {
        let records = PersistedCollection::load(store, SAVED_CHECKLISTS_KEY, Vec::new()).await?;
        Ok(Self { records })
    }

    /// All templates in save order
    pub async fn list(&self) -> Vec<ChecklistTemplate> {
        self.records.snapshot().await
    }

    /// Template at `index`, if any
    pub async fn get(&self, index: usize) -> Option<ChecklistTemplate> {
        self.records
            .read(|records| records.get(index).cloned())
            .await
    }

    /// Append a template, generating a title when the given one is blank
    pub async fn save(&self, mut template: ChecklistTemplate) -> DomainResult<ChecklistTemplate> {
        self.records
            .mutate(move |records| {
                if template.title.trim().is_empty() {
                    template.title = format!("Checklist Template {}", records.len() + 1);
                }
                records.push(template.clone());
                Ok(template)
            })
            .await
    }

    /// Remove the template at `index`; out of range is a silent no-op
    pub async fn remove(&self, index: usize) -> DomainResult<()> {
        self.records
            .mutate(move |records| {
                if index < records.len() {
                    records.remove(index);
                } else {
                    debug!("remove of checklist template {} ignored", index);
                }
                Ok(())
            })
            .await
    }
}
