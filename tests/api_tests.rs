//! End-to-end tests of the HTTP API over a loopback socket.

use std::sync::Arc;

use facematch::{
    serve_on, Container, FaceRepository, InMemoryFaceRepository, StoredEmbedding,
    DEFAULT_RECOGNITION_THRESHOLD, EMBEDDING_DIMENSIONS,
};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

struct TestApp {
    base_url: String,
    repo: Arc<InMemoryFaceRepository>,
    http: reqwest::Client,
}

impl TestApp {
    async fn spawn() -> Self {
        let repo = Arc::new(InMemoryFaceRepository::new());
        let container = Arc::new(Container::with_repository(
            repo.clone(),
            DEFAULT_RECOGNITION_THRESHOLD,
        ));

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(serve_on(listener, container, std::future::pending()));

        Self {
            base_url: format!("http://{}", addr),
            repo,
            http: reqwest::Client::new(),
        }
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .expect("request");
        let status = response.status();
        let body = response.json().await.expect("json body");
        (status, body)
    }

    async fn register(&self, user_id: &str, name: &str, embedding: &[f64]) -> (StatusCode, Value) {
        self.post(
            "/register",
            json!({"user_id": user_id, "name": name, "embedding": embedding}),
        )
        .await
    }

    async fn recognize(&self, embedding: &[f64]) -> (StatusCode, Value) {
        self.post("/recognize", json!({"embedding": embedding})).await
    }
}

fn axis(index: usize) -> Vec<f64> {
    let mut v = vec![0.0; EMBEDDING_DIMENSIONS];
    v[index] = 1.0;
    v
}

/// A vector at 60 degrees from `axis(0)`, cosine 0.5.
fn half_aligned() -> Vec<f64> {
    let mut v = vec![0.0; EMBEDDING_DIMENSIONS];
    v[0] = 0.5;
    v[1] = 0.75_f64.sqrt();
    v
}

#[tokio::test]
async fn register_then_recognize_same_face() {
    let app = TestApp::spawn().await;

    let (status, body) = app.register("2021001", "Siti", &axis(3)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["user_id"], "2021001");
    assert_eq!(body["name"], "Siti");
    assert_eq!(body["new_embedding_id"].as_str().unwrap().len(), 20);

    let (status, body) = app.recognize(&axis(3)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["user_id"], "2021001");
    assert_eq!(body["name"], "Siti");
    assert!((body["similarity"].as_f64().unwrap() - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn wrong_dimensions_are_rejected() {
    let app = TestApp::spawn().await;

    let (status, body) = app.register("u1", "A", &[0.1; 128]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Embedding must be 192-dimensional");

    let (status, body) = app.recognize(&[0.1; 193]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Embedding must be 192-dimensional");

    assert_eq!(app.repo.embedding_count().await, 0);
}

#[tokio::test]
async fn empty_store_is_not_recognized() {
    let app = TestApp::spawn().await;

    let (status, body) = app.recognize(&axis(0)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Face not recognized. Highest similarity: 0.00");
}

#[tokio::test]
async fn below_threshold_reports_best_similarity() {
    let app = TestApp::spawn().await;
    app.register("u1", "Andi", &axis(0)).await;

    let (status, body) = app.recognize(&half_aligned()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Face not recognized. Highest similarity: 0.50");
}

#[tokio::test]
async fn best_user_wins_across_multiple_embeddings() {
    let app = TestApp::spawn().await;
    app.register("alice", "Alice", &axis(0)).await;
    app.register("bob", "Bob", &axis(1)).await;
    app.register("bob", "Bob", &axis(2)).await;

    let (status, body) = app.recognize(&axis(2)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "bob");
    assert_eq!(body["name"], "Bob");
}

#[tokio::test]
async fn re_registering_updates_name_and_keeps_embeddings() {
    let app = TestApp::spawn().await;
    app.register("u1", "Old Name", &axis(0)).await;
    let (status, body) = app.register("u1", "New Name", &axis(1)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "New Name");
    assert_eq!(app.repo.embedding_count().await, 2);

    let (status, body) = app.recognize(&axis(0)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "New Name");
}

#[tokio::test]
async fn empty_stored_vectors_are_skipped() {
    let app = TestApp::spawn().await;
    app.repo
        .insert_raw("broken", None, StoredEmbedding::new("e0", vec![]))
        .await;

    let (status, body) = app.recognize(&axis(0)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Face not recognized. Highest similarity: 0.00");
}

#[tokio::test]
async fn integer_embedding_values_are_accepted() {
    let app = TestApp::spawn().await;
    let ints: Vec<i64> = (0..EMBEDDING_DIMENSIONS as i64).map(|i| i % 3).collect();

    let (status, _) = app
        .post(
            "/register",
            json!({"user_id": "u1", "name": "Int", "embedding": ints}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.post("/recognize", json!({"embedding": ints})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "u1");
}

#[tokio::test]
async fn missing_fields_are_unprocessable() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post("/register", json!({"user_id": "u1", "embedding": axis(0)}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("name"));

    let (status, _) = app
        .post("/recognize", json!({"embedding": "not a list"}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn invalid_json_is_bad_request() {
    let app = TestApp::spawn().await;

    let response = app
        .http
        .post(format!("{}/recognize", app.base_url))
        .header("content-type", "application/json")
        .body("{\"embedding\": [1, 2,")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn invalid_user_id_is_bad_request() {
    let app = TestApp::spawn().await;

    let (status, body) = app.register("a/b", "Slash", &axis(0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("a/b"));
}

#[tokio::test]
async fn embeddings_are_stored_at_full_precision() {
    let app = TestApp::spawn().await;
    let mut embedding = vec![1e20; EMBEDDING_DIMENSIONS];
    embedding[0] = 0.123456789012345;

    let (status, _) = app.register("u1", "Precise", &embedding).await;
    assert_eq!(status, StatusCode::OK);

    let stored = app.repo.list_embeddings("u1").await.unwrap();
    assert_eq!(stored[0].vector(), embedding.as_slice());

    let (status, body) = app.recognize(&embedding).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "u1");
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::spawn().await;

    let response = app
        .http
        .get(format!("{}/health", app.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}
