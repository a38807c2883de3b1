use async_trait::async_trait;
use tracing::{debug, warn};

use crate::application::FaceRepository;
use crate::connector::adapter::new_document_id;
use crate::domain::{DomainError, FaceEmbedding, StoredEmbedding, User};

use super::client::FirestoreClient;
use super::value::{Document, Value, Write};

pub const USERS_COLLECTION: &str = "users";
pub const EMBEDDINGS_COLLECTION: &str = "embeddings";
const NAME_FIELD: &str = "name";
const VECTOR_FIELD: &str = "vector";
const CREATED_AT_FIELD: &str = "created_at";

/// Face repository on Firestore.
///
/// Layout: `users/{user_id}` holds `name`; each registration adds
/// `users/{user_id}/embeddings/{auto_id}` with `vector` and a server-set `created_at`.
pub struct FirestoreFaceRepository {
    client: FirestoreClient,
}

impl FirestoreFaceRepository {
    pub fn new(client: FirestoreClient) -> Self {
        Self { client }
    }

    fn registration_writes(&self, user: &User, embedding: &FaceEmbedding, embedding_id: &str) -> Vec<Write> {
        let user_doc = Document::new(self.client.resource_name(&[USERS_COLLECTION, user.id()]))
            .with_field(NAME_FIELD, Value::string(user.name()));

        let embedding_doc = Document::new(self.client.resource_name(&[
            USERS_COLLECTION,
            user.id(),
            EMBEDDINGS_COLLECTION,
            embedding_id,
        ]))
        .with_field(VECTOR_FIELD, Value::vector(embedding.vector()));

        vec![
            Write::merge(user_doc),
            Write::set(embedding_doc)
                .must_not_exist()
                .with_request_time(CREATED_AT_FIELD),
        ]
    }

    fn user_from_document(doc: &Document) -> User {
        let name = doc.field(NAME_FIELD).and_then(Value::as_text);
        User::reconstitute(doc.id(), name)
    }

    fn embedding_from_document(doc: &Document) -> StoredEmbedding {
        let vector = match doc.field(VECTOR_FIELD) {
            None => Vec::new(),
            Some(value) => match value.as_vector() {
                Some(vector) if vector.iter().all(|x| x.is_finite()) => vector,
                _ => {
                    warn!("Embedding {} has a malformed vector, skipping", doc.name);
                    Vec::new()
                }
            },
        };
        StoredEmbedding::new(doc.id(), vector)
    }
}

#[async_trait]
impl FaceRepository for FirestoreFaceRepository {
    async fn register_embedding(
        &self,
        user: &User,
        embedding: &FaceEmbedding,
    ) -> Result<String, DomainError> {
        let embedding_id = new_document_id();
        let writes = self.registration_writes(user, embedding, &embedding_id);

        let response = self.client.commit(writes).await?;
        debug!(
            "Committed embedding {} for user {} at {}",
            embedding_id,
            user.id(),
            response.commit_time.as_deref().unwrap_or("unknown time")
        );

        Ok(embedding_id)
    }

    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let docs = self
            .client
            .list_documents(&[USERS_COLLECTION], &[NAME_FIELD])
            .await?;
        Ok(docs.iter().map(Self::user_from_document).collect())
    }

    async fn list_embeddings(&self, user_id: &str) -> Result<Vec<StoredEmbedding>, DomainError> {
        let docs = self
            .client
            .list_documents(&[USERS_COLLECTION, user_id, EMBEDDINGS_COLLECTION], &[VECTOR_FIELD])
            .await?;
        Ok(docs.iter().map(Self::embedding_from_document).collect())
    }
}
