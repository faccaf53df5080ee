//! In-memory document store
//!
//! Process-local stand-in for the managed document database. Contents are
//! lost on restart.

use application::{
    error::ApplicationError,
    ports::{DocumentStorePort, StoredDocument},
};
use async_trait::async_trait;
use dashmap::DashMap;
use domain::DocumentKey;
use serde_json::Value;

/// [`DocumentStorePort`] over a concurrent map
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: DashMap<DocumentKey, Value>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl DocumentStorePort for InMemoryDocumentStore {
    async fn get(&self, key: &DocumentKey) -> Result<Option<Value>, ApplicationError> {
        Ok(self.documents.get(key).map(|doc| doc.value().clone()))
    }

    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, ApplicationError> {
        let mut documents: Vec<StoredDocument> = self
            .documents
            .iter()
            .filter(|doc| doc.key().collection() == collection)
            .map(|doc| StoredDocument {
                id: doc.key().id().to_string(),
                body: doc.value().clone(),
            })
            .collect();
        documents.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(documents)
    }

    async fn put(&self, key: &DocumentKey, body: Value) -> Result<(), ApplicationError> {
        self.documents.insert(key.clone(), body);
        Ok(())
    }

    async fn delete(&self, key: &DocumentKey) -> Result<bool, ApplicationError> {
        Ok(self.documents.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn key(collection: &str, id: &str) -> DocumentKey {
        DocumentKey::new(collection, id).unwrap()
    }

    #[tokio::test]
    async fn put_then_get() {
        let store = InMemoryDocumentStore::new();
        store
            .put(&key("matches", "m1"), json!({"home": "Rovers"}))
            .await
            .unwrap();

        let doc = store.get(&key("matches", "m1")).await.unwrap();
        assert_eq!(doc, Some(json!({"home": "Rovers"})));
        assert!(store.get(&key("matches", "m2")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_scoped_and_sorted() {
        let store = InMemoryDocumentStore::new();
        store.put(&key("matches", "b"), json!({})).await.unwrap();
        store.put(&key("matches", "a"), json!({})).await.unwrap();
        store.put(&key("officials", "z"), json!({})).await.unwrap();

        let ids: Vec<String> = store
            .list("matches")
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn delete_reports_existence() {
        let store = InMemoryDocumentStore::new();
        store.put(&key("discipline", "d1"), json!({})).await.unwrap();

        assert!(store.delete(&key("discipline", "d1")).await.unwrap());
        assert!(!store.delete(&key("discipline", "d1")).await.unwrap());
        assert!(store.is_empty());
    }
}
