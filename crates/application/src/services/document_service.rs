//! Admin document use cases
//!
//! Thin layer over [`DocumentStorePort`] that validates keys before they
//! reach the store. Document bodies are opaque; only their top-level shape
//! (a JSON object) is checked.

use std::sync::Arc;

use domain::DocumentKey;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    error::ApplicationError,
    ports::{DocumentStorePort, StoredDocument},
};

/// Document operations behind the admin guard
#[derive(Clone)]
pub struct DocumentService {
    store: Arc<dyn DocumentStorePort>,
}

impl std::fmt::Debug for DocumentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentService").finish_non_exhaustive()
    }
}

impl DocumentService {
    pub fn new(store: Arc<dyn DocumentStorePort>) -> Self {
        Self { store }
    }

    pub async fn get(&self, collection: &str, id: &str) -> Result<Value, ApplicationError> {
        let key = DocumentKey::new(collection, id)?;
        self.store
            .get(&key)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(key.to_string()))
    }

    pub async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, ApplicationError> {
        DocumentKey::validate_collection(collection)?;
        let documents = self.store.list(collection).await?;
        debug!(collection, count = documents.len(), "Listed documents");
        Ok(documents)
    }

    pub async fn put(
        &self,
        collection: &str,
        id: &str,
        body: Value,
    ) -> Result<(), ApplicationError> {
        let key = DocumentKey::new(collection, id)?;
        if !body.is_object() {
            return Err(ApplicationError::InvalidInput(
                "document body must be a JSON object".to_string(),
            ));
        }
        self.store.put(&key, body).await?;
        info!(document = %key, "Stored document");
        Ok(())
    }

    pub async fn delete(&self, collection: &str, id: &str) -> Result<(), ApplicationError> {
        let key = DocumentKey::new(collection, id)?;
        if self.store.delete(&key).await? {
            info!(document = %key, "Deleted document");
            Ok(())
        } else {
            Err(ApplicationError::NotFound(key.to_string()))
        }
    }
}
