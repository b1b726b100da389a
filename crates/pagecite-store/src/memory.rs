//! In-memory document store

use crate::StoreError;
use pagecite_domain::traits::DocumentResolver;
use pagecite_domain::DocumentId;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Document bytes held in a shared in-process map
///
/// Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: Arc<RwLock<HashMap<DocumentId, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `bytes` under `id`, replacing any previous content
    pub fn insert(
        &self,
        id: impl Into<DocumentId>,
        bytes: impl Into<Vec<u8>>,
    ) -> Result<(), StoreError> {
        let mut documents = self.documents.write().map_err(|_| StoreError::Poisoned)?;
        documents.insert(id.into(), bytes.into());
        Ok(())
    }

    /// Remove a document, returning its bytes if it existed
    pub fn remove(&self, id: &DocumentId) -> Result<Option<Vec<u8>>, StoreError> {
        let mut documents = self.documents.write().map_err(|_| StoreError::Poisoned)?;
        Ok(documents.remove(id))
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.documents.read().map(|d| d.len()).unwrap_or(0)
    }

    /// True when no documents are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DocumentResolver for MemoryStore {
    type Error = StoreError;

    async fn fetch(&self, id: &DocumentId) -> Result<Option<Vec<u8>>, StoreError> {
        let documents = self.documents.read().map_err(|_| StoreError::Poisoned)?;
        Ok(documents.get(id).cloned())
    }
}
