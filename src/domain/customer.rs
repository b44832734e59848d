//! Customer Entity
//!
//! A customer record moves through a three-stage workflow and carries,
//! next to its fixed attributes, one value per active field definition.
//! Dynamic values live in their own `values` map so a user-defined field
//! can never shadow a fixed attribute like `status` or `paid`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::checklist::ChecklistItem;
use super::entity::Entity;

/// Prefix of the human-readable sequential identifier
pub const JOIN_ID_PREFIX: &str = "CUS";

/// Workflow stage of a customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Freshly recorded, not yet worked on
    #[default]
    New,
    InProgress,
    Completed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::New => "new",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "in-progress" => Status::InProgress,
            "completed" => Status::Completed,
            _ => Status::New,
        }
    }
}

/// Handling priority of a customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "low" => Priority::Low,
            "high" => Priority::High,
            "urgent" => Priority::Urgent,
            _ => Priority::Normal,
        }
    }
}

/// Value of one dynamic field on a customer
///
/// Serialized untagged, so the stored form is the bare JSON scalar the
/// original application wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

/// A customer record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Opaque unique identifier, assigned at creation
    pub id: String,
    /// Human-readable sequential identifier ("CUS-NN")
    pub join_id: String,
    /// Creation timestamp, immutable after create
    pub created_at: DateTime<Utc>,
    /// Date the data was entered (form input, kept verbatim)
    #[serde(default)]
    pub entry_date: String,
    /// Date the customer was added (form input, kept verbatim)
    #[serde(default)]
    pub date_added: String,
    /// Workflow stage
    #[serde(default)]
    pub status: Status,
    /// Payment received
    #[serde(default)]
    pub paid: bool,
    /// Handling priority
    #[serde(default)]
    pub priority: Priority,
    /// Decimal amount as entered; parsed only for aggregation
    #[serde(default)]
    pub amount: String,
    /// Per-customer checklist, replaced wholesale on every edit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checklist: Option<Vec<ChecklistItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checklist_title: Option<String>,
    /// Dynamic values keyed by field definition name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, FieldValue>,
}

impl Entity for Customer {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Create payload: everything the caller may supply; `id`, `join_id` and
/// `created_at` are assigned by the lifecycle manager.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    #[serde(default)]
    pub entry_date: String,
    #[serde(default)]
    pub date_added: String,
    pub status: Option<Status>,
    pub paid: Option<bool>,
    pub priority: Option<Priority>,
    pub amount: Option<String>,
    pub checklist: Option<Vec<ChecklistItem>>,
    pub checklist_title: Option<String>,
    #[serde(default)]
    pub values: BTreeMap<String, FieldValue>,
}

/// Update payload: `Some` fields are merged into the record, `None` fields
/// are left untouched. `values` entries merge key by key; `checklist`
/// replaces the whole sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    pub entry_date: Option<String>,
    pub date_added: Option<String>,
    pub status: Option<Status>,
    pub paid: Option<bool>,
    pub priority: Option<Priority>,
    pub amount: Option<String>,
    pub checklist: Option<Vec<ChecklistItem>>,
    pub checklist_title: Option<String>,
    #[serde(default)]
    pub values: BTreeMap<String, FieldValue>,
}

impl Customer {
    /// Materialize a draft into a full record
    pub fn from_draft(draft: CustomerDraft, join_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            join_id,
            created_at: Utc::now(),
            entry_date: draft.entry_date,
            date_added: draft.date_added,
            status: draft.status.unwrap_or_default(),
            paid: draft.paid.unwrap_or(false),
            priority: draft.priority.unwrap_or_default(),
            amount: draft.amount.unwrap_or_default(),
            checklist: draft.checklist,
            checklist_title: draft.checklist_title,
            values: draft.values,
        }
    }

    /// Merge a patch into this record
    pub fn apply(&mut self, patch: CustomerPatch) {
        if let Some(entry_date) = patch.entry_date {
            self.entry_date = entry_date;
        }
        if let Some(date_added) = patch.date_added {
            self.date_added = date_added;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(paid) = patch.paid {
            self.paid = paid;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(checklist) = patch.checklist {
            self.checklist = Some(checklist);
        }
        if let Some(title) = patch.checklist_title {
            self.checklist_title = Some(title);
        }
        for (name, value) in patch.values {
            self.values.insert(name, value);
        }
    }
}

/// Derive the next join id from the live collection
///
/// Scans every numeric suffix after the first '-', takes the maximum and
/// increments. Suffixes that fail to parse are skipped. The result is
/// zero-padded to two digits; 100 and up simply widen.
pub fn next_join_id(customers: &[Customer]) -> String {
    let max = customers
        .iter()
        .filter_map(|c| c.join_id.split_once('-'))
        .filter_map(|(_, suffix)| suffix.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{}-{:02}", JOIN_ID_PREFIX, max + 1)
}

fn parse_amount(amount: &str) -> f64 {
    amount.trim().parse::<f64>().unwrap_or(0.0)
}

/// Sum of every customer's amount; non-numeric entries count as 0
pub fn amount_total(customers: &[Customer]) -> f64 {
    customers.iter().map(|c| parse_amount(&c.amount)).sum()
}

/// Sum of amounts restricted to paid customers
pub fn paid_amount_total(customers: &[Customer]) -> f64 {
    customers
        .iter()
        .filter(|c| c.paid)
        .map(|c| parse_amount(&c.amount))
        .sum()
}
