//! Document key value object

use std::fmt;

use crate::errors::DomainError;

const MAX_SEGMENT_LEN: usize = 64;

/// `(collection, id)` address of a stored document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentKey {
    collection: String,
    id: String,
}

impl DocumentKey {
    /// Validate and build a key.
    ///
    /// Both segments must be 1..=64 bytes of `[A-Za-z0-9_-]`.
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Result<Self, DomainError> {
        let collection = collection.into();
        let id = id.into();
        validate_segment(&collection)?;
        validate_segment(&id)?;
        Ok(Self { collection, id })
    }

    /// Validate a collection name on its own (used for listing)
    pub fn validate_collection(collection: &str) -> Result<(), DomainError> {
        validate_segment(collection)
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

fn validate_segment(segment: &str) -> Result<(), DomainError> {
    let valid = !segment.is_empty()
        && segment.len() <= MAX_SEGMENT_LEN
        && segment
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidDocumentKey(segment.to_string()))
    }
}
