//! Template Repository - Print Template Registry
//!
//! Standard merge-style CRUD with one protected record: the seeded
//! default template may be edited but never renamed or deleted. Both
//! violations are guarded no-ops surfaced through the warn log, never
//! errors, because the surrounding flows expect the operation to simply
//! not happen.

use std::sync::Arc;

use log::{debug, warn};

use crate::domain::{DomainResult, PrintTemplate, TemplateDraft, TemplatePatch};
use crate::store::{PersistedCollection, StoreBackend};

/// Store key backing the print templates collection
pub const TEMPLATES_KEY: &str = "templates";

/// Registry of print templates
pub struct TemplateRepository {
    records: PersistedCollection<PrintTemplate>,
}

impl TemplateRepository {
    /// Load the registry, seeding the default template when the key is
    /// absent
    pub async fn load(store: Arc<dyn StoreBackend>) -> DomainResult<Self> {
        let records =
            PersistedCollection::load(store, TEMPLATES_KEY, vec![PrintTemplate::seed_default()])
                .await?;
        Ok(Self { records })
    }

    /// All templates in insertion order
    pub async fn list(&self) -> Vec<PrintTemplate> {
        self.records.snapshot().await
    }

    pub async fn find_by_id(&self, id: &str) -> Option<PrintTemplate> {
        self.records.find_by_id(id).await
    }

    /// The protected default template
    pub async fn default_template(&self) -> Option<PrintTemplate> {
        self.records
            .read(|records| records.iter().find(|t| t.is_default).cloned())
            .await
    }

    /// Add a template with a fresh id; created templates are never the
    /// default
    pub async fn create(&self, draft: TemplateDraft) -> DomainResult<PrintTemplate> {
        self.records
            .mutate(move |records| {
                let template = PrintTemplate::from_draft(draft);
                records.push(template.clone());
                Ok(template)
            })
            .await
    }

    /// Merge a patch into the template with the given id
    ///
    /// On the default template a rename is silently overridden back;
    /// header/footer changes still apply.
    pub async fn update(&self, id: &str, patch: TemplatePatch) -> DomainResult<()> {
        let id = id.to_string();
        self.records
            .mutate(move |records| {
                match records.iter_mut().find(|t| t.id == id) {
                    Some(template) => {
                        if template.apply(patch) {
                            warn!("rename of the default template ignored");
                        }
                    }
                    None => debug!("update of unknown template '{}' ignored", id),
                }
                Ok(())
            })
            .await
    }

    /// Remove the template with the given id; refuses on the default
    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        let id = id.to_string();
        self.records
            .mutate(move |records| {
                match records.iter().position(|t| t.id == id) {
                    Some(index) if records[index].is_default => {
                        warn!("delete of the default template ignored");
                    }
                    Some(index) => {
                        records.remove(index);
                    }
                    None => debug!("delete of unknown template '{}' ignored", id),
                }
                Ok(())
            })
            .await
    }
}
