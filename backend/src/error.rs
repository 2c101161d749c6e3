use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shared::ErrorBody;
use thiserror::Error;
use tracing::error;

use crate::mapper::MapperError;
use crate::storage::StoreError;

/// Errors a request handler can surface. Everything that is not a caller
/// mistake collapses to a 500; the body shape matches the error envelope the
/// API has always produced.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Mapping(#[from] MapperError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, name, message) = match &self {
            ApiError::BadRequest(reason) => {
                (StatusCode::BAD_REQUEST, "Bad Request", reason.clone())
            }
            ApiError::Store(e) => {
                error!("Storage failure: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "Internal server error".to_string(),
                )
            }
            ApiError::Mapping(e) => {
                error!("Mapping failure: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ErrorBody::new(name, message, status.as_u16());
        (status, Json(body)).into_response()
    }
}
