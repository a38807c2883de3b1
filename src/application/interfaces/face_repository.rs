use async_trait::async_trait;

use crate::domain::{DomainError, FaceEmbedding, StoredEmbedding, User};

/// Persistence of users and their registered face embeddings.
#[async_trait]
pub trait FaceRepository: Send + Sync {
    /// Set the user's name, leaving other fields of the user record intact,
    /// and append `embedding` to the user's embeddings.
    ///
    /// Returns the ID of the newly stored embedding.
    async fn register_embedding(
        &self,
        user: &User,
        embedding: &FaceEmbedding,
    ) -> Result<String, DomainError>;

    async fn list_users(&self) -> Result<Vec<User>, DomainError>;

    async fn list_embeddings(&self, user_id: &str) -> Result<Vec<StoredEmbedding>, DomainError>;
}
