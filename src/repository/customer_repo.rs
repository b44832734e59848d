//! Customer Repository - Lifecycle Manager
//!
//! Owns the customers collection: create with uniqueness and join-id
//! assignment, merge-style update, outright delete. Unknown ids are
//! silent no-ops on update/delete; only create can reject.

use std::sync::Arc;

use log::debug;

use crate::domain::{
    next_join_id, Customer, CustomerDraft, CustomerPatch, DomainError, DomainResult,
    FieldDefinition,
};
use crate::store::{PersistedCollection, StoreBackend};

/// Store key backing the customers collection
pub const CUSTOMERS_KEY: &str = "customers";

/// Lifecycle manager for customer records
pub struct CustomerRepository {
    records: PersistedCollection<Customer>,
}

impl CustomerRepository {
    /// Load the collection; an absent key starts empty
    pub async fn load(store: Arc<dyn StoreBackend>) -> DomainResult<Self> {
        let records = PersistedCollection::load(store, CUSTOMERS_KEY, Vec::new()).await?;
        Ok(Self { records })
    }

    /// All customers in insertion order
    pub async fn list(&self) -> Vec<Customer> {
        self.records.snapshot().await
    }

    pub async fn find_by_id(&self, id: &str) -> Option<Customer> {
        self.records.find_by_id(id).await
    }

    /// Create a customer from a draft
    ///
    /// `active_fields` is the field registry's current state; a draft whose
    /// values match an existing customer on every required field is
    /// rejected before anything is written. The join id is derived from
    /// the live collection, so deleting the highest-numbered customer
    /// frees its suffix for the next create.
    pub async fn create(
        &self,
        draft: CustomerDraft,
        active_fields: &[FieldDefinition],
    ) -> DomainResult<Customer> {
        let required: Vec<&FieldDefinition> =
            active_fields.iter().filter(|f| f.required).collect();

        self.records
            .mutate(move |records| {
                // With zero required fields every record would vacuously
                // match, so the check only runs when at least one exists.
                if !required.is_empty() {
                    let duplicate = records.iter().any(|existing| {
                        required
                            .iter()
                            .all(|f| existing.values.get(&f.name) == draft.values.get(&f.name))
                    });
                    if duplicate {
                        return Err(DomainError::DuplicateRecord(
                            "a customer with identical required fields already exists"
                                .to_string(),
                        ));
                    }
                }

                let customer = Customer::from_draft(draft, next_join_id(records));
                records.push(customer.clone());
                Ok(customer)
            })
            .await
    }

    /// Merge a patch into the customer with the given id
    pub async fn update(&self, id: &str, patch: CustomerPatch) -> DomainResult<()> {
        let id = id.to_string();
        self.records
            .mutate(move |records| {
                match records.iter_mut().find(|c| c.id == id) {
                    Some(customer) => customer.apply(patch),
                    None => debug!("update of unknown customer '{}' ignored", id),
                }
                Ok(())
            })
            .await
    }

    /// Remove the customer with the given id
    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        let id = id.to_string();
        self.records
            .mutate(move |records| {
                let before = records.len();
                records.retain(|c| c.id != id);
                if records.len() == before {
                    debug!("delete of unknown customer '{}' ignored", id);
                }
                Ok(())
            })
            .await
    }
}
