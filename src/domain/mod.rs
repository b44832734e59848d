//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has no dependencies beyond serde, chrono and uuid.

mod checklist;
mod customer;
mod entity;
mod field;
mod template;

pub use checklist::{ChecklistItem, ChecklistTemplate};
pub use customer::{
    amount_total, next_join_id, paid_amount_total, Customer, CustomerDraft, CustomerPatch,
    FieldValue, Priority, Status, JOIN_ID_PREFIX,
};
pub use entity::{DomainError, DomainResult, Entity};
pub use field::{
    is_reserved_name, FieldDefinition, FieldDraft, FieldKind, FieldPatch, RESERVED_FIELD_NAMES,
};
pub use template::{PrintTemplate, TemplateDraft, TemplatePatch};
