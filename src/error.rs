// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorResponse;

pub const INVALID_BODY: &str = "Invalid request body";
pub const MESSAGE_REQUIRED: &str = "Message is required and must be a non-empty string";
pub const SERVICE_UNAVAILABLE: &str = "Service temporarily unavailable";

#[derive(Debug, Error)]
pub enum AppError {
    /// Caller-fixable input problem; the message is returned verbatim.
    #[error("{0}")]
    InvalidRequest(&'static str),

    /// The generation path failed. The cause is logged, never returned.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{public}: {cause}")]
    DataUnavailable { public: &'static str, cause: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DataUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            AppError::InvalidRequest(msg) | AppError::NotFound(msg) => *msg,
            AppError::UpstreamUnavailable(_) => SERVICE_UNAVAILABLE,
            AppError::DataUnavailable { public, .. } => *public,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.public_message().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
