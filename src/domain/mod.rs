//! # Domain Layer
//!
//! Face embeddings, users, recognition results and the similarity metric.
//! This layer is independent of the HTTP framework and of the document store.

pub mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
