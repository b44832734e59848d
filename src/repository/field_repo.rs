//! Field Repository - Field Registry
//!
//! Owns the field definitions the customer form is built from. Seeds the
//! three stock fields into an empty store. Names are validated here:
//! reserved attribute names are refused, and no two definitions may share
//! a name (a shared name would make the uniqueness check and the dynamic
//! value lookup ambiguous).

use std::sync::Arc;

use log::debug;

use crate::domain::{
    is_reserved_name, DomainError, DomainResult, FieldDefinition, FieldDraft, FieldKind,
    FieldPatch,
};
use crate::store::{PersistedCollection, StoreBackend};

/// Store key backing the field definitions collection
pub const FIELDS_KEY: &str = "fields";

/// Registry of dynamic field definitions
pub struct FieldRepository {
    records: PersistedCollection<FieldDefinition>,
}

fn seed_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::from_draft(FieldDraft {
            name: "name".to_string(),
            kind: FieldKind::Text,
            required: true,
            options: Vec::new(),
        }),
        FieldDefinition::from_draft(FieldDraft {
            name: "email".to_string(),
            kind: FieldKind::Email,
            required: true,
            options: Vec::new(),
        }),
        FieldDefinition::from_draft(FieldDraft {
            name: "phone".to_string(),
            kind: FieldKind::Text,
            required: true,
            options: Vec::new(),
        }),
    ]
}

fn validate_name(name: &str, others: &[FieldDefinition]) -> DomainResult<()> {
    if is_reserved_name(name) {
        return Err(DomainError::InvalidInput(format!(
            "'{}' is a reserved attribute name",
            name
        )));
    }
    if others.iter().any(|f| f.name == name) {
        return Err(DomainError::InvalidInput(format!(
            "a field named '{}' already exists",
            name
        )));
    }
    Ok(())
}

impl FieldRepository {
    /// Load the registry, seeding the stock fields when the key is absent
    pub async fn load(store: Arc<dyn StoreBackend>) -> DomainResult<Self> {
        let records = PersistedCollection::load(store, FIELDS_KEY, seed_fields()).await?;
        Ok(Self { records })
    }

    /// All definitions in insertion order
    pub async fn list(&self) -> Vec<FieldDefinition> {
        self.records.snapshot().await
    }

    pub async fn find_by_id(&self, id: &str) -> Option<FieldDefinition> {
        self.records.find_by_id(id).await
    }

    /// Definitions currently marked required
    pub async fn required(&self) -> Vec<FieldDefinition> {
        self.records
            .read(|records| records.iter().filter(|f| f.required).cloned().collect())
            .await
    }

    /// Add a definition with a fresh id
    pub async fn create(&self, draft: FieldDraft) -> DomainResult<FieldDefinition> {
        self.records
            .mutate(move |records| {
                validate_name(&draft.name, records)?;
                let field = FieldDefinition::from_draft(draft);
                records.push(field.clone());
                Ok(field)
            })
            .await
    }

    /// Merge a patch into the definition with the given id
    ///
    /// Renames are validated like creates, against every other definition.
    /// Customer values stored under the old name are left behind untouched.
    pub async fn update(&self, id: &str, patch: FieldPatch) -> DomainResult<()> {
        let id = id.to_string();
        self.records
            .mutate(move |records| {
                let Some(index) = records.iter().position(|f| f.id == id) else {
                    debug!("update of unknown field '{}' ignored", id);
                    return Ok(());
                };
                if let Some(name) = &patch.name {
                    if *name != records[index].name {
                        let others: Vec<FieldDefinition> = records
                            .iter()
                            .filter(|f| f.id != id)
                            .cloned()
                            .collect();
                        validate_name(name, &others)?;
                    }
                }
                records[index].apply(patch);
                Ok(())
            })
            .await
    }

    /// Remove the definition with the given id; no cascade to customers
    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        let id = id.to_string();
        self.records
            .mutate(move |records| {
                let before = records.len();
                records.retain(|f| f.id != id);
                if records.len() == before {
                    debug!("delete of unknown field '{}' ignored", id);
                }
                Ok(())
            })
            .await
    }
}
