//! Print Template Entity
//!
//! Templates wrap a printed customer document in a header and footer.
//! Exactly one record carries the `isDefault` flag; that record can be
//! edited but never renamed or deleted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::Entity;

/// Header/footer pair for printed customer documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintTemplate {
    /// Opaque unique identifier
    pub id: String,
    pub name: String,
    /// Newline-preserving header text
    pub header: String,
    /// Newline-preserving footer text
    pub footer: String,
    /// Marks the protected default record
    #[serde(default)]
    pub is_default: bool,
}

impl Entity for PrintTemplate {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Create payload; the registry assigns the id and the flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateDraft {
    pub name: String,
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub footer: String,
}

/// Update payload with merge semantics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplatePatch {
    pub name: Option<String>,
    pub header: Option<String>,
    pub footer: Option<String>,
}

impl PrintTemplate {
    pub fn from_draft(draft: TemplateDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            header: draft.header,
            footer: draft.footer,
            is_default: false,
        }
    }

    /// The template seeded into an empty store
    pub fn seed_default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Default Template".to_string(),
            header: "Company Name\nAddress Line 1\nAddress Line 2\nPhone: **123-456-7890**"
                .to_string(),
            footer: "Thank you for your business!".to_string(),
            is_default: true,
        }
    }

    /// Merge a patch into this template
    ///
    /// The default record keeps its name; an attempted rename is dropped
    /// and reported back via the return value.
    pub fn apply(&mut self, patch: TemplatePatch) -> bool {
        let mut rename_dropped = false;
        if let Some(name) = patch.name {
            if self.is_default && name != self.name {
                rename_dropped = true;
            } else {
                self.name = name;
            }
        }
        if let Some(header) = patch.header {
            self.header = header;
        }
        if let Some(footer) = patch.footer {
            self.footer = footer;
        }
        rename_dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_default_is_flagged() {
        let seed = PrintTemplate::seed_default();
        assert!(seed.is_default);
        assert_eq!(seed.name, "Default Template");
        assert!(seed.header.contains('\n'));
    }

    #[test]
    fn test_default_keeps_name_but_takes_content() {
        let mut seed = PrintTemplate::seed_default();
        let dropped = seed.apply(TemplatePatch {
            name: Some("Renamed".to_string()),
            header: Some("New header".to_string()),
            footer: None,
        });
        assert!(dropped);
        assert_eq!(seed.name, "Default Template");
        assert_eq!(seed.header, "New header");
    }

    #[test]
    fn test_non_default_renames_freely() {
        let mut t = PrintTemplate::from_draft(TemplateDraft {
            name: "Invoice".to_string(),
            header: String::new(),
            footer: String::new(),
        });
        let dropped = t.apply(TemplatePatch {
            name: Some("Receipt".to_string()),
            ..Default::default()
        });
        assert!(!dropped);
        assert_eq!(t.name, "Receipt");
    }
}
