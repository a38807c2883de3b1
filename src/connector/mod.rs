//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Storage (Firestore over REST, in-memory for local runs and tests)
//! - HTTP API (axum)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
