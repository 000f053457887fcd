mod health;
mod movies;

pub use health::health_handler;
pub use movies::*;
