//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities carry an opaque string identifier and are thread-safe.

use serde::{Deserialize, Serialize};

/// Core trait for all identified domain entities
///
/// Checklist templates are positional (index-addressed) and do not
/// implement this trait.
pub trait Entity: Sized + Send + Sync + Clone {
    /// Returns the entity's opaque unique identifier
    fn id(&self) -> &str;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// Unknown-id update/delete is NOT an error anywhere in this crate; those
/// operations are silent no-ops by contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DomainError {
    /// Customer create would collide with an existing record on every
    /// required field
    DuplicateRecord(String),
    /// Validation failure (reserved or duplicate field name, bad payload)
    InvalidInput(String),
    /// Imported payload rejected (parse failure, missing key, over quota)
    ImportRejected(String),
    /// Store backend I/O or serialization fault
    Storage(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::DuplicateRecord(msg) => write!(f, "Duplicate record: {}", msg),
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::ImportRejected(msg) => write!(f, "Import rejected: {}", msg),
            DomainError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
