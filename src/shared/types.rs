use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error envelope returned for every failed request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(message: Option<String>, errors: Option<Vec<String>>) -> Self {
        Self {
            success: false,
            message,
            errors,
        }
    }
}
