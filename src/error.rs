use std::io;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("missing or invalid auth token")]
    Unauthorized,

    #[error("empty upload body")]
    EmptyBody,

    #[error("invalid image name: {0}")]
    NameInvalid(String),

    #[error("no images stored")]
    NoImages,

    #[error("image unknown: {0}")]
    ImageUnknown(String), // Contains the requested name

    #[error("storage error: {0}")]
    Storage(#[from] io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, message) = match &self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            Self::EmptyBody => (StatusCode::BAD_REQUEST, "empty upload body".to_string()),
            Self::NameInvalid(name) => (
                StatusCode::BAD_REQUEST,
                format!("invalid image name: {name}"),
            ),
            Self::NoImages => (StatusCode::NOT_FOUND, "no images stored".to_string()),
            Self::ImageUnknown(name) => {
                (StatusCode::NOT_FOUND, format!("image unknown: {name}"))
            }
            // Filesystem detail stays in the log, not the response body.
            Self::Storage(err) => {
                tracing::error!("storage failure: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage failure".to_string(),
                )
            }
        };

        (status_code, message).into_response()
    }
}
