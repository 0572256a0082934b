use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::domain::ErrorResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Query build error: {0}")]
    QueryBuildError(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::SqlxError(_) | AppError::QueryBuildError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<sea_query::error::Error> for AppError {
    fn from(err: sea_query::error::Error) -> Self {
        AppError::QueryBuildError(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Missing resources answer with an empty body.
        if status == StatusCode::NOT_FOUND {
            return status.into_response();
        }

        error!("Request failed: {self}");
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
