//! Persistence collaborator boundary.
//!
//! The core performs single-record reads and writes through [`PdiStore`] and
//! trusts the backing implementation to serialize conflicting writes to the
//! same record (last-writer-wins; no version stamps). [`MemoryStore`] is the
//! in-memory implementation used by tests and demos.

use std::cell::RefCell;
use std::fmt;

use uuid::Uuid;

use crate::error::Error;
use crate::request::PdiRequest;

/// Kind of store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The referenced record does not exist
    NotFound,
    /// The backing store failed
    Backend,
}

impl fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreErrorKind::NotFound => write!(f, "record not found"),
            StoreErrorKind::Backend => write!(f, "backend failure"),
        }
    }
}

/// Error returned by a [`PdiStore`] operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("store error ({kind}): {message}")]
pub struct StoreError {
    /// Why the operation failed
    pub kind: StoreErrorKind,
    /// Detail message
    pub message: String,
}

impl StoreError {
    /// Creates a new store error.
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// A `NotFound` store error for the given id.
    pub fn not_found(id: Uuid) -> Self {
        Self::new(StoreErrorKind::NotFound, format!("no record with id {id}"))
    }

    /// A `Backend` store error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Backend, message)
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        match e.kind {
            StoreErrorKind::NotFound => Error::not_found(e.message),
            StoreErrorKind::Backend => Error::internal(e.message),
        }
    }
}

/// Durable storage for PDI requests, keyed by record id.
///
/// Single-record writes are assumed atomic; no cross-record transaction
/// guarantee is required by the core.
pub trait PdiStore {
    /// Persists a new record.
    ///
    /// # Errors
    ///
    /// Returns a `Backend` error if the write fails (including an attempt to
    /// insert a duplicate id).
    fn insert(&self, record: PdiRequest) -> Result<(), StoreError>;

    /// Fetches a record by id, or `None` if absent.
    fn get(&self, id: Uuid) -> Result<Option<PdiRequest>, StoreError>;

    /// Replaces an existing record, returning the stored value.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` error if no record with the given id exists.
    fn update(&self, record: PdiRequest) -> Result<PdiRequest, StoreError>;

    /// Returns all records, in insertion order.
    fn list(&self) -> Result<Vec<PdiRequest>, StoreError>;
}

/// In-memory [`PdiStore`] backed by a `RefCell<Vec<_>>`.
///
/// Interior mutability lets tests and demos share one store immutably, the
/// same way the audit-trail recorder works.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<Vec<PdiRequest>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    /// Returns `true` if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl PdiStore for MemoryStore {
    fn insert(&self, record: PdiRequest) -> Result<(), StoreError> {
        let mut records = self.records.borrow_mut();
        if records.iter().any(|r| r.id == record.id) {
            return Err(StoreError::backend(format!(
                "duplicate record id {}",
                record.id
            )));
        }
        records.push(record);
        Ok(())
    }

    fn get(&self, id: Uuid) -> Result<Option<PdiRequest>, StoreError> {
        Ok(self.records.borrow().iter().find(|r| r.id == id).cloned())
    }

    fn update(&self, record: PdiRequest) -> Result<PdiRequest, StoreError> {
        let mut records = self.records.borrow_mut();
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(record)
            }
            None => Err(StoreError::not_found(record.id)),
        }
    }

    fn list(&self) -> Result<Vec<PdiRequest>, StoreError> {
        Ok(self.records.borrow().clone())
    }
}
