//! Session Preferences
//!
//! Small UI-session-scoped values living next to the core collections:
//! the entry form's working checklist and its title, the field names
//! preselected for printing, and the show-join-id toggle. Each one is a
//! single JSON-encoded store key, read and written directly.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{ChecklistItem, ChecklistTemplate, DomainError, DomainResult};
use crate::store::StoreBackend;

pub const CURRENT_CHECKLIST_KEY: &str = "currentChecklist";
pub const CURRENT_CHECKLIST_TITLE_KEY: &str = "currentChecklistTitle";
pub const DEFAULT_PRINT_FIELDS_KEY: &str = "defaultPrintFields";
pub const SHOW_JOIN_ID_KEY: &str = "showJoinId";

/// Store-backed accessors for the session keys
pub struct SessionPrefs {
    store: Arc<dyn StoreBackend>,
}

impl SessionPrefs {
    pub fn new(store: Arc<dyn StoreBackend>) -> Self {
        Self { store }
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> DomainResult<Option<T>> {
        match self.store.read_key(key).await? {
            Some(payload) => serde_json::from_str(&payload)
                .map(Some)
                .map_err(|e| DomainError::Storage(format!("parse key '{}': {}", key, e))),
            None => Ok(None),
        }
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T) -> DomainResult<()> {
        let payload = serde_json::to_string(value)
            .map_err(|e| DomainError::Storage(format!("serialize key '{}': {}", key, e)))?;
        self.store.write_key(key, &payload).await
    }

    /// The entry form's working checklist; empty when never saved
    pub async fn current_checklist(&self) -> DomainResult<Vec<ChecklistItem>> {
        Ok(self.read(CURRENT_CHECKLIST_KEY).await?.unwrap_or_default())
    }

    pub async fn set_current_checklist(&self, items: &[ChecklistItem]) -> DomainResult<()> {
        self.write(CURRENT_CHECKLIST_KEY, &items).await
    }

    pub async fn current_checklist_title(&self) -> DomainResult<String> {
        Ok(self
            .read(CURRENT_CHECKLIST_TITLE_KEY)
            .await?
            .unwrap_or_default())
    }

    pub async fn set_current_checklist_title(&self, title: &str) -> DomainResult<()> {
        self.write(CURRENT_CHECKLIST_TITLE_KEY, &title).await
    }

    /// Replace the working checklist with a template's items: fresh ids,
    /// completion reset, title taken over
    pub async fn apply_checklist_template(
        &self,
        template: &ChecklistTemplate,
    ) -> DomainResult<Vec<ChecklistItem>> {
        let items = template.instantiate();
        self.set_current_checklist(&items).await?;
        self.set_current_checklist_title(&template.title).await?;
        Ok(items)
    }

    /// Field names preselected on the print dialog; `None` when the user
    /// never saved a selection
    pub async fn default_print_fields(&self) -> DomainResult<Option<Vec<String>>> {
        self.read(DEFAULT_PRINT_FIELDS_KEY).await
    }

    pub async fn set_default_print_fields(&self, names: &[String]) -> DomainResult<()> {
        self.write(DEFAULT_PRINT_FIELDS_KEY, &names).await
    }

    /// Whether printed documents include the join id
    pub async fn show_join_id(&self) -> DomainResult<bool> {
        Ok(self.read(SHOW_JOIN_ID_KEY).await?.unwrap_or(false))
    }

    pub async fn set_show_join_id(&self, show: bool) -> DomainResult<()> {
        self.write(SHOW_JOIN_ID_KEY, &show).await
    }
}
