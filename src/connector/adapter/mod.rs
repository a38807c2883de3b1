mod document_id;
mod in_memory_face_repository;

pub mod firestore;

pub use document_id::*;
pub use firestore::{
    FirestoreClient, FirestoreFaceRepository, ServiceAccountKey, ServiceAccountTokenProvider,
    StaticTokenProvider, TokenProvider,
};
pub use in_memory_face_repository::*;
