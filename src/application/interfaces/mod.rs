mod face_repository;

pub use face_repository::*;
