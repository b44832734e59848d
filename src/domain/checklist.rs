//! Checklist Entities
//!
//! A checklist is an ordered list of completable text items owned by one
//! customer (or by the entry form's working list). Checklist templates are
//! reusable title + item-text lists with no ids and no completion state;
//! they are addressed by position, not by id.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One completable line of a checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Random token, unique enough within one checklist
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl ChecklistItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            completed: false,
        }
    }
}

/// A reusable checklist: title plus bare item texts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistTemplate {
    pub title: String,
    pub items: Vec<String>,
}

impl ChecklistTemplate {
    /// Capture a working checklist as a template, keeping only the texts
    pub fn from_items(title: impl Into<String>, items: &[ChecklistItem]) -> Self {
        Self {
            title: title.into(),
            items: items.iter().map(|item| item.text.clone()).collect(),
        }
    }

    /// Materialize the template into a working checklist with fresh ids
    /// and completion reset
    pub fn instantiate(&self) -> Vec<ChecklistItem> {
        self.items.iter().map(|text| ChecklistItem::new(text.as_str())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_round_trip_keeps_texts_only() {
        let mut done = ChecklistItem::new("call back");
        done.completed = true;
        let items = vec![done, ChecklistItem::new("send invoice")];

        let template = ChecklistTemplate::from_items("Onboarding", &items);
        assert_eq!(template.items, vec!["call back", "send invoice"]);

        let fresh = template.instantiate();
        assert_eq!(fresh.len(), 2);
        assert!(fresh.iter().all(|item| !item.completed));
        assert_ne!(fresh[0].id, items[0].id);
    }
}
