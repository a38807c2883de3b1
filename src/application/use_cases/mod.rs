mod recognize_face;
mod register_face;
mod store_stats;

pub use recognize_face::*;
pub use register_face::*;
pub use store_stats::*;
