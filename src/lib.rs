pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    FaceRepository, RecognizeFaceUseCase, RegisterFaceUseCase, StoreStats, StoreStatsUseCase,
};

pub use connector::{
    router, serve, serve_on, ApiError, Container, ContainerConfig, FirestoreClient,
    FirestoreConfig, FirestoreFaceRepository, InMemoryFaceRepository, ServiceAccountKey,
    ServiceAccountTokenProvider, StaticTokenProvider, TokenProvider,
};

pub use domain::{
    cosine_similarity, DomainError, FaceEmbedding, RecognitionMatch, RecognitionOutcome,
    Registration, StoredEmbedding, User, DEFAULT_RECOGNITION_THRESHOLD, EMBEDDING_DIMENSIONS,
};
