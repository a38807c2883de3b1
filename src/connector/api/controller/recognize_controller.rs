use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::RecognitionOutcome;

use super::super::{ApiError, Container};

#[derive(Debug, Deserialize)]
pub struct RecognizeRequest {
    pub embedding: Vec<f64>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RecognizeResponse {
    pub status: String,
    pub user_id: String,
    pub name: String,
    pub similarity: f64,
}

/// `POST /recognize`
pub async fn recognize(
    State(container): State<Arc<Container>>,
    payload: Result<Json<RecognizeRequest>, JsonRejection>,
) -> Result<Json<RecognizeResponse>, ApiError> {
    let Json(request) = payload?;
    debug!("POST /recognize dims={}", request.embedding.len());

    let outcome = container
        .recognize_use_case()
        .execute(request.embedding)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to recognize"))?;

    match outcome {
        RecognitionOutcome::Recognized(found) => Ok(Json(RecognizeResponse {
            status: "success".to_string(),
            user_id: found.user_id().to_string(),
            name: found.name().to_string(),
            similarity: found.similarity(),
        })),
        RecognitionOutcome::NotRecognized { best_similarity } => Err(ApiError::not_found(
            format!(
                "Face not recognized. Highest similarity: {:.2}",
                best_similarity
            ),
        )),
    }
}
