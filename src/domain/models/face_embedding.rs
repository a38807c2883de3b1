use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Length every face embedding must have.
pub const EMBEDDING_DIMENSIONS: usize = 192;

/// A face embedding that passed dimensionality validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceEmbedding {
    vector: Vec<f64>,
}

impl FaceEmbedding {
    pub fn validated(vector: Vec<f64>) -> Result<Self, DomainError> {
        if vector.len() != EMBEDDING_DIMENSIONS {
            return Err(DomainError::invalid_input(format!(
                "Embedding must be {}-dimensional",
                EMBEDDING_DIMENSIONS
            )));
        }
        Ok(Self { vector })
    }

    pub fn vector(&self) -> &[f64] {
        &self.vector
    }

    pub fn dimensions(&self) -> usize {
        self.vector.len()
    }
}

/// One document of a user's `embeddings` sub-collection as read back from the store.
///
/// Stored documents are not validated: a vector may be empty (missing field)
/// or of a different length if it was written by another client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEmbedding {
    id: String,
    vector: Vec<f64>,
}

impl StoredEmbedding {
    pub fn new(id: impl Into<String>, vector: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            vector,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn vector(&self) -> &[f64] {
        &self.vector
    }

    pub fn is_empty(&self) -> bool {
        self.vector.is_empty()
    }
}
