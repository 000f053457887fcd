mod health;
mod movie;

pub use health::*;
pub use movie::*;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
