//! Field Definition Entity
//!
//! Field definitions describe the dynamic schema customers are captured
//! against. Names double as the storage key of the matching customer
//! value, so they must not collide with fixed attributes and must stay
//! unique across the registry.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::Entity;

/// Attribute names reserved by the fixed customer record
///
/// A field definition may not take one of these names; otherwise a dynamic
/// value could shadow workflow state.
pub const RESERVED_FIELD_NAMES: &[&str] = &[
    "id",
    "joinId",
    "createdAt",
    "entryDate",
    "dateAdded",
    "status",
    "paid",
    "priority",
    "amount",
    "checklist",
    "checklistTitle",
    "values",
];

/// Input control kind of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Number,
    Email,
    Tel,
    Select,
    Date,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
            FieldKind::Select => "select",
            FieldKind::Date => "date",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "number" => FieldKind::Number,
            "email" => FieldKind::Email,
            "tel" => FieldKind::Tel,
            "select" => FieldKind::Select,
            "date" => FieldKind::Date,
            _ => FieldKind::Text,
        }
    }
}

/// One dynamic attribute customers may carry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Opaque unique identifier
    pub id: String,
    /// Display name; also the key of the matching customer value
    pub name: String,
    /// Input control kind
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Whether the field participates in the create-time uniqueness check
    pub required: bool,
    /// Choices; only meaningful when `kind` is `Select`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Entity for FieldDefinition {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Create payload; the registry assigns the id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDraft {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Update payload with merge semantics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<FieldKind>,
    pub required: Option<bool>,
    pub options: Option<Vec<String>>,
}

impl FieldDefinition {
    pub fn from_draft(draft: FieldDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            kind: draft.kind,
            required: draft.required,
            options: draft.options,
        }
    }

    /// Merge a patch into this definition
    pub fn apply(&mut self, patch: FieldPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(options) = patch.options {
            self.options = options;
        }
    }
}

/// Whether a name collides with a fixed customer attribute
pub fn is_reserved_name(name: &str) -> bool {
    RESERVED_FIELD_NAMES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_spelling() {
        assert_eq!(serde_json::to_string(&FieldKind::Tel).unwrap(), "\"tel\"");
        assert_eq!(FieldKind::from_str("select"), FieldKind::Select);
        assert_eq!(FieldKind::from_str("unknown"), FieldKind::Text);
    }

    #[test]
    fn test_reserved_names() {
        assert!(is_reserved_name("status"));
        assert!(is_reserved_name("joinId"));
        assert!(!is_reserved_name("shoe size"));
    }

    #[test]
    fn test_type_key_on_wire() {
        let field = FieldDefinition::from_draft(FieldDraft {
            name: "email".to_string(),
            kind: FieldKind::Email,
            required: true,
            options: Vec::new(),
        });
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "email");
        assert!(json.get("options").is_none());
    }
}
