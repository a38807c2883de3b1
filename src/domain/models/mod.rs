mod face_embedding;
mod recognition;
mod user;

pub use face_embedding::*;
pub use recognition::*;
pub use user::*;
