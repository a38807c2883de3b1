use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::FaceRepository;
use crate::connector::adapter::new_document_id;
use crate::domain::{DomainError, FaceEmbedding, StoredEmbedding, User};

#[derive(Default)]
struct UserRecord {
    name: Option<String>,
    embeddings: Vec<StoredEmbedding>,
}

/// Face repository held in process memory.
///
/// Users are listed in ID order and embeddings in insertion order, which
/// matches how the document store returns them.
pub struct InMemoryFaceRepository {
    users: Arc<Mutex<BTreeMap<String, UserRecord>>>,
}

impl InMemoryFaceRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Insert a stored embedding as-is, bypassing validation.
    pub async fn insert_raw(&self, user_id: &str, name: Option<&str>, embedding: StoredEmbedding) {
        let mut users = self.users.lock().await;
        let record = users.entry(user_id.to_string()).or_default();
        if let Some(name) = name {
            record.name = Some(name.to_string());
        }
        record.embeddings.push(embedding);
    }

    pub async fn embedding_count(&self) -> usize {
        let users = self.users.lock().await;
        users.values().map(|u| u.embeddings.len()).sum()
    }
}

impl Default for InMemoryFaceRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FaceRepository for InMemoryFaceRepository {
    async fn register_embedding(
        &self,
        user: &User,
        embedding: &FaceEmbedding,
    ) -> Result<String, DomainError> {
        let mut users = self.users.lock().await;
        let record = users.entry(user.id().to_string()).or_default();
        record.name = Some(user.name().to_string());

        let id = new_document_id();
        record
            .embeddings
            .push(StoredEmbedding::new(id.clone(), embedding.vector().to_vec()));

        debug!(
            "Stored embedding {} for user {} ({} total)",
            id,
            user.id(),
            record.embeddings.len()
        );
        Ok(id)
    }

    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.lock().await;
        Ok(users
            .iter()
            .map(|(id, record)| User::reconstitute(id.clone(), record.name.clone()))
            .collect())
    }

    async fn list_embeddings(&self, user_id: &str) -> Result<Vec<StoredEmbedding>, DomainError> {
        let users = self.users.lock().await;
        Ok(users
            .get(user_id)
            .map(|record| record.embeddings.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EMBEDDING_DIMENSIONS, UNKNOWN_USER_NAME};

    fn embedding(value: f64) -> FaceEmbedding {
        FaceEmbedding::validated(vec![value; EMBEDDING_DIMENSIONS]).unwrap()
    }

    #[tokio::test]
    async fn register_appends_and_renames() {
        let repo = InMemoryFaceRepository::new();

        let first = repo
            .register_embedding(&User::new("u1", "Old"), &embedding(1.0))
            .await
            .unwrap();
        let second = repo
            .register_embedding(&User::new("u1", "New"), &embedding(2.0))
            .await
            .unwrap();
        assert_ne!(first, second);

        let users = repo.list_users().await.unwrap();
        assert_eq!(users, vec![User::new("u1", "New")]);

        let stored = repo.list_embeddings("u1").await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].id(), first);
        assert_eq!(stored[1].id(), second);
    }

    #[tokio::test]
    async fn unknown_user_has_no_embeddings() {
        let repo = InMemoryFaceRepository::new();
        assert!(repo.list_embeddings("ghost").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn raw_insert_without_name_uses_placeholder() {
        let repo = InMemoryFaceRepository::new();
        repo.insert_raw("u9", None, StoredEmbedding::new("e1", vec![]))
            .await;

        let users = repo.list_users().await.unwrap();
        assert_eq!(users[0].name(), UNKNOWN_USER_NAME);
        assert_eq!(repo.embedding_count().await, 1);
    }
}
