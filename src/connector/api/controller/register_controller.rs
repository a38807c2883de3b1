use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::super::{ApiError, Container};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub user_id: String,
    pub name: String,
    pub embedding: Vec<f64>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RegisterResponse {
    pub status: String,
    pub user_id: String,
    pub name: String,
    pub new_embedding_id: String,
}

/// `POST /register`
pub async fn register(
    State(container): State<Arc<Container>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let Json(request) = payload?;
    debug!(
        "POST /register user_id={} dims={}",
        request.user_id,
        request.embedding.len()
    );

    let registration = container
        .register_use_case()
        .execute(&request.user_id, &request.name, request.embedding)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to register"))?;

    Ok(Json(RegisterResponse {
        status: "success".to_string(),
        user_id: registration.user_id,
        name: registration.name,
        new_embedding_id: registration.embedding_id,
    }))
}
