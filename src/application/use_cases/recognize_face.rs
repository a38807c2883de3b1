use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::application::FaceRepository;
use crate::domain::{
    cosine_similarity, DomainError, FaceEmbedding, RecognitionMatch, RecognitionOutcome,
    DEFAULT_RECOGNITION_THRESHOLD, NOT_RECOGNIZED_NAME,
};

/// Finds the registered user whose embeddings best match a probe embedding.
///
/// Every stored embedding of every user is scored; there is no index.
pub struct RecognizeFaceUseCase {
    face_repo: Arc<dyn FaceRepository>,
    threshold: f64,
}

impl RecognizeFaceUseCase {
    pub fn new(face_repo: Arc<dyn FaceRepository>) -> Self {
        Self {
            face_repo,
            threshold: DEFAULT_RECOGNITION_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub async fn execute(&self, embedding: Vec<f64>) -> Result<RecognitionOutcome, DomainError> {
        let probe = FaceEmbedding::validated(embedding)?;
        let start_time = Instant::now();

        let mut best_name = NOT_RECOGNIZED_NAME.to_string();
        let mut best_id: Option<String> = None;
        let mut best_overall = 0.0_f64;
        let mut scanned = 0usize;

        let users = self.face_repo.list_users().await?;
        for user in &users {
            let embeddings = self.face_repo.list_embeddings(user.id()).await?;

            let mut best_for_user = 0.0_f64;
            for stored in embeddings.iter().filter(|e| !e.is_empty()) {
                scanned += 1;
                let similarity = cosine_similarity(probe.vector(), stored.vector());
                if similarity > best_for_user {
                    best_for_user = similarity;
                }
            }

            debug!("User {} best similarity {:.4}", user.id(), best_for_user);

            if best_for_user > best_overall {
                best_overall = best_for_user;
                best_name = user.name().to_string();
                best_id = Some(user.id().to_string());
            }
        }

        info!(
            "Scanned {} embeddings across {} users in {:?}, best similarity {:.4} (threshold {:.2})",
            scanned,
            users.len(),
            start_time.elapsed(),
            best_overall,
            self.threshold
        );

        match best_id {
            Some(user_id) if best_overall >= self.threshold => Ok(RecognitionOutcome::Recognized(
                RecognitionMatch::new(user_id, best_name, best_overall),
            )),
            _ => Ok(RecognitionOutcome::NotRecognized {
                best_similarity: best_overall,
            }),
        }
    }
}
