//! Read-only registry store contract and an in-memory snapshot implementation.

use async_trait::async_trait;
use ohub_domain::normalize_code;
use ohub_domain::registry::DomainObject;
use thiserror::Error;

/// Failure talking to the persisted catalogue. The router maps this to its
/// generic envelope; no retry happens anywhere in the core.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("registry store unavailable: {0}")]
    Unavailable(String),
}

/// Persisted catalogue of domain objects and actions. Read-only here: rows are
/// created and edited administratively outside this core.
#[async_trait]
pub trait RegistryStore: Send + Sync {
    /// The full catalogue. Order is unspecified; the registry service sorts.
    async fn list_all(&self) -> Result<Vec<DomainObject>, StoreError>;

    /// Lookup by normalized code.
    async fn get_by_code(&self, code: &str) -> Result<Option<DomainObject>, StoreError>;
}

/// An immutable in-memory catalogue snapshot.
///
/// Object and action codes are normalized on construction so lookups only ever
/// compare normalized forms.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    objects: Vec<DomainObject>,
}

impl MemoryRegistry {
    #[must_use]
    pub fn new(objects: Vec<DomainObject>) -> Self {
        let mut objects: Vec<DomainObject> = objects
            .into_iter()
            .map(|mut object| {
                object.code = normalize_code(&object.code);
                for action in &mut object.actions {
                    action.code = normalize_code(&action.code);
                }
                object
            })
            .collect();
        objects.sort_by(|a, b| a.code.cmp(&b.code));
        Self { objects }
    }

    /// Parses a catalogue snapshot from its JSON representation.
    ///
    /// # Errors
    /// Returns the underlying serde error for malformed rows.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let objects: Vec<DomainObject> = serde_json::from_str(raw)?;
        Ok(Self::new(objects))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl RegistryStore for MemoryRegistry {
    async fn list_all(&self) -> Result<Vec<DomainObject>, StoreError> {
        Ok(self.objects.clone())
    }

    async fn get_by_code(&self, code: &str) -> Result<Option<DomainObject>, StoreError> {
        Ok(self.objects.iter().find(|o| o.code == code).cloned())
    }
}
