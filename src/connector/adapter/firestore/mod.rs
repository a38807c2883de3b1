//! Firestore REST adapter.

mod auth;
mod client;
mod repository;
mod value;

pub use auth::*;
pub use client::*;
pub use repository::*;
pub use value::*;
