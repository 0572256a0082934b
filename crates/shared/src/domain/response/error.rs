use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let status = match err {
            AppError::NotFound(_) => "not_found",
            _ => "error",
        };

        ErrorResponse {
            status: status.to_string(),
            message: err.to_string(),
        }
    }
}
