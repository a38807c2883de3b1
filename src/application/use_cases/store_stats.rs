use std::sync::Arc;

use crate::application::FaceRepository;
use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreStats {
    pub users: usize,
    pub embeddings: usize,
    /// Stored embeddings without a usable vector; recognition skips these.
    pub empty_embeddings: usize,
}

/// Counts users and stored embeddings with the same scan recognition performs.
pub struct StoreStatsUseCase {
    face_repo: Arc<dyn FaceRepository>,
}

impl StoreStatsUseCase {
    pub fn new(face_repo: Arc<dyn FaceRepository>) -> Self {
        Self { face_repo }
    }

    pub async fn execute(&self) -> Result<StoreStats, DomainError> {
        let users = self.face_repo.list_users().await?;
        let mut stats = StoreStats {
            users: users.len(),
            ..Default::default()
        };

        for user in &users {
            let embeddings = self.face_repo.list_embeddings(user.id()).await?;
            stats.embeddings += embeddings.len();
            stats.empty_embeddings += embeddings.iter().filter(|e| e.is_empty()).count();
        }

        Ok(stats)
    }
}
