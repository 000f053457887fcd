use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use marquee_core::{CatalogError, StorageError};
use thiserror::Error;
use tracing::{error, warn};

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("invalid request body: {0}")]
    Body(#[from] JsonRejection),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Body(_) => StatusCode::BAD_REQUEST,
            AppError::Catalog(err) => match err {
                CatalogError::NotFound(_) | CatalogError::EmptySelection(_) => {
                    StatusCode::NOT_FOUND
                }
                CatalogError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
                CatalogError::Conflict(_) => StatusCode::CONFLICT,
                CatalogError::Storage(StorageError::Unavailable(_) | StorageError::Timeout(_)) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                CatalogError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // storage details stay in the logs
        let message = if status.is_server_error() {
            error!(error = %self, status = status.as_u16(), "request failed");
            match status {
                StatusCode::SERVICE_UNAVAILABLE => "storage temporarily unavailable".to_string(),
                _ => "internal server error".to_string(),
            }
        } else {
            warn!(error = %self, status = status.as_u16(), "request rejected");
            self.to_string()
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: CatalogError) -> StatusCode {
        AppError::from(err).status()
    }

    #[test]
    fn catalog_errors_map_to_status() {
        assert_eq!(
            status_of(CatalogError::NotFound("1".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(CatalogError::EmptySelection("empty".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(CatalogError::InvalidArgument("count".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(CatalogError::Conflict("1".into())),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn storage_errors_map_to_status() {
        assert_eq!(
            status_of(StorageError::Timeout("pool".into()).into()),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(StorageError::Unavailable("io".into()).into()),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(StorageError::Query("syntax".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_is_bad_request() {
        assert_eq!(
            AppError::validation("title must not be blank").status(),
            StatusCode::BAD_REQUEST
        );
    }
}
