//! Admin document handlers
//!
//! Thin wrappers over [`application::DocumentService`]; they only run behind
//! the admin guard.

use application::StoredDocument;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Serialize;
use serde_json::Value;

use crate::{error::ApiError, state::AppState};

/// A single document
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResponse {
    pub id: String,
    pub body: Value,
}

impl From<StoredDocument> for DocumentResponse {
    fn from(doc: StoredDocument) -> Self {
        Self {
            id: doc.id,
            body: doc.body,
        }
    }
}

/// Every document of a collection
#[derive(Debug, Clone, Serialize)]
pub struct DocumentListResponse {
    pub collection: String,
    pub count: usize,
    pub documents: Vec<DocumentResponse>,
}

/// `GET /api/admin/documents/{collection}`
pub async fn list_documents(
    State(state): State<AppState>,
    Path(collection): Path<String>,
) -> Result<Json<DocumentListResponse>, ApiError> {
    let documents: Vec<DocumentResponse> = state
        .documents
        .list(&collection)
        .await?
        .into_iter()
        .map(DocumentResponse::from)
        .collect();

    Ok(Json(DocumentListResponse {
        collection,
        count: documents.len(),
        documents,
    }))
}

/// `GET /api/admin/documents/{collection}/{id}`
pub async fn get_document(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let body = state.documents.get(&collection, &id).await?;
    Ok(Json(DocumentResponse { id, body }))
}

/// `PUT /api/admin/documents/{collection}/{id}`
pub async fn put_document(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    state.documents.put(&collection, &id, body.clone()).await?;
    Ok(Json(DocumentResponse { id, body }))
}

/// `DELETE /api/admin/documents/{collection}/{id}`
pub async fn delete_document(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state.documents.delete(&collection, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
