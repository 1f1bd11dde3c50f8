//! Enrollment storage
//!
//! Workflows only ever see the [`TemplateStore`] trait, so records can live
//! in memory, a file, or a database without touching the matching logic.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use fplock_types::{EnrollmentRecord, StoreError};

/// Persistence boundary for enrollment records.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Every stored record, in insertion order
    async fn all(&self) -> Result<Vec<EnrollmentRecord>, StoreError>;

    /// Persist a new record, rejecting identities that already exist
    async fn insert(&self, record: EnrollmentRecord) -> Result<(), StoreError>;
}

/// In-memory store backed by a `Vec`.
///
/// Good for tests and single-process deployments; contents are lost on
/// drop. Cloning shares the underlying records.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Vec<EnrollmentRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl TemplateStore for MemoryStore {
    async fn all(&self) -> Result<Vec<EnrollmentRecord>, StoreError> {
        Ok(self.records.read().clone())
    }

    async fn insert(&self, record: EnrollmentRecord) -> Result<(), StoreError> {
        let mut records = self.records.write();
        if records.iter().any(|r| r.identity == record.identity) {
            return Err(StoreError::DuplicateIdentity(record.identity));
        }

        debug!(identity = %record.identity, size = record.template.len(), "Record stored");
        records.push(record);

        Ok(())
    }
}
