use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use workout_core::{FieldError, StoreError};

/// Startup and serving failures returned from `main`.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Per-request failures, rendered as JSON error bodies.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("Status=422, Validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Status=500, Storage error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ValidationResponse {
            detail: Vec<FieldError>,
        }

        #[derive(Serialize)]
        struct ErrorResponse {
            message: String,
        }

        match self {
            ApiError::Validation(detail) => {
                warn!("Rejected workout log: {:?}", detail);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ValidationResponse { detail }),
                )
                    .into_response()
            }
            ApiError::Store(e) => {
                error!(%e, "Storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        message: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
