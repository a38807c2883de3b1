use std::sync::Arc;

use tracing::{debug, info};

use crate::application::FaceRepository;
use crate::domain::{validate_user_id, DomainError, FaceEmbedding, Registration, User};

/// Stores a new face embedding for a user, creating the user on first use.
pub struct RegisterFaceUseCase {
    face_repo: Arc<dyn FaceRepository>,
}

impl RegisterFaceUseCase {
    pub fn new(face_repo: Arc<dyn FaceRepository>) -> Self {
        Self { face_repo }
    }

    pub async fn execute(
        &self,
        user_id: &str,
        name: &str,
        embedding: Vec<f64>,
    ) -> Result<Registration, DomainError> {
        let embedding = FaceEmbedding::validated(embedding)?;
        validate_user_id(user_id)?;

        let user = User::new(user_id, name);
        debug!(
            "Registering {}-dimensional embedding for user {}",
            embedding.dimensions(),
            user.id()
        );

        let embedding_id = self.face_repo.register_embedding(&user, &embedding).await?;

        info!(
            "Registered embedding {} for user {} ({})",
            embedding_id,
            user.id(),
            user.name()
        );

        Ok(Registration {
            user_id: user.id().to_string(),
            name: user.name().to_string(),
            embedding_id,
        })
    }
}
