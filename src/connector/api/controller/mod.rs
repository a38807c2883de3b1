pub mod health_controller;
pub mod recognize_controller;
pub mod register_controller;
pub mod stats_controller;

pub use health_controller::health;
pub use recognize_controller::{recognize, RecognizeRequest, RecognizeResponse};
pub use register_controller::{register, RegisterRequest, RegisterResponse};
pub use stats_controller::StatsController;
