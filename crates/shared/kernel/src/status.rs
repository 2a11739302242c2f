//! Status-repository contract: typed readers for the status guard.
//!
//! Each domain entity that backs a status guard gets one [`StatusReader`]
//! implementation, registered in a static table keyed by entity name. This
//! replaces ad hoc "pick the right property" logic with closed, typed adapters.

use crate::error::WiringError;
use async_trait::async_trait;
use fxhash::FxHashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// A failed read against the status source (connection loss, bad field, ...).
#[derive(Debug, Clone, Error)]
#[error("status read failed: {message}")]
pub struct StatusReadError {
    pub message: String,
}

impl StatusReadError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Outcome of a status lookup by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLookup {
    /// No record with that id exists.
    Missing,
    /// The record exists; its status field may still be null.
    Found { status: Option<String> },
}

/// Reads exactly the declared status field of one entity type.
#[async_trait]
pub trait StatusReader: Send + Sync {
    /// Looks up the record by primary key and returns its status field.
    async fn find_status(&self, id: &str) -> Result<StatusLookup, StatusReadError>;

    /// Minimal existence probe selecting only the status field (limit one),
    /// used by Self-Validation to prove the field is queryable on the live schema.
    async fn probe(&self) -> Result<(), StatusReadError>;
}

impl fmt::Debug for dyn StatusReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn StatusReader")
    }
}

#[derive(Clone)]
enum ReaderSlot {
    Declared,
    Bound(Arc<dyn StatusReader>),
}

impl fmt::Debug for ReaderSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declared => f.write_str("Declared"),
            Self::Bound(_) => f.write_str("Bound(..)"),
        }
    }
}

/// The static table from status entity name to its reader.
#[derive(Debug, Clone, Default)]
pub struct StatusReaderMap {
    entries: FxHashMap<String, ReaderSlot>,
}

impl StatusReaderMap {
    #[must_use]
    pub fn builder() -> StatusReaderMapBuilder {
        StatusReaderMapBuilder::default()
    }

    /// Resolves an entity name to its reader.
    ///
    /// # Errors
    /// Returns [`WiringError::StatusRepoNotMapped`] for an unknown entity and
    /// [`WiringError::StatusRepoInvalid`] for a declared-but-unbound one.
    pub fn resolve(
        &self,
        object_code: &str,
        entity_name: &str,
    ) -> Result<Arc<dyn StatusReader>, WiringError> {
        match self.entries.get(entity_name) {
            Some(ReaderSlot::Bound(reader)) => Ok(Arc::clone(reader)),
            Some(ReaderSlot::Declared) => Err(WiringError::StatusRepoInvalid {
                object_code: object_code.to_owned(),
                status_entity_name: entity_name.to_owned(),
            }),
            None => Err(WiringError::StatusRepoNotMapped {
                object_code: object_code.to_owned(),
                status_entity_name: entity_name.to_owned(),
            }),
        }
    }

    #[must_use]
    pub fn contains(&self, entity_name: &str) -> bool {
        self.entries.contains_key(entity_name)
    }
}

/// Builder collecting entity-name → reader bindings at wiring time.
#[derive(Debug, Default)]
pub struct StatusReaderMapBuilder {
    entries: FxHashMap<String, ReaderSlot>,
}

impl StatusReaderMapBuilder {
    #[must_use]
    pub fn register(
        mut self,
        entity_name: impl Into<String>,
        reader: Arc<dyn StatusReader>,
    ) -> Self {
        self.entries.insert(entity_name.into(), ReaderSlot::Bound(reader));
        self
    }

    /// Declares an entity without binding a reader. Never overwrites a bound one.
    #[must_use]
    pub fn declare(mut self, entity_name: impl Into<String>) -> Self {
        self.entries.entry(entity_name.into()).or_insert(ReaderSlot::Declared);
        self
    }

    #[must_use]
    pub fn build(self) -> StatusReaderMap {
        StatusReaderMap { entries: self.entries }
    }
}
