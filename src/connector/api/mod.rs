pub mod container;
pub mod controller;
pub mod error;
pub mod router;

pub use container::{Container, ContainerConfig, FirestoreConfig};
pub use error::ApiError;
pub use router::{router, serve, serve_on};
