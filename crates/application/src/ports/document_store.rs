//! Document store port
//!
//! Narrow get/list/put/delete interface over the managed document database
//! that admin handlers write to. Documents are opaque JSON values.

use async_trait::async_trait;
use domain::DocumentKey;
#[cfg(test)]
use mockall::automock;
use serde_json::Value;

use crate::error::ApplicationError;

/// A document together with its id inside a collection
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub body: Value,
}

/// Port for document persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentStorePort: Send + Sync {
    /// Fetch a document, `None` if absent
    async fn get(&self, key: &DocumentKey) -> Result<Option<Value>, ApplicationError>;

    /// List every document of a collection, ordered by id
    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, ApplicationError>;

    /// Create or replace a document
    async fn put(&self, key: &DocumentKey, body: Value) -> Result<(), ApplicationError>;

    /// Delete a document; returns whether it existed
    async fn delete(&self, key: &DocumentKey) -> Result<bool, ApplicationError>;
}
