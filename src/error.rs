// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorResponse;
use crate::services::chat_model::ModelError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("userInput is missing or empty")]
    MissingInput,

    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("model request timed out")]
    ModelTimeout,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingInput => StatusCode::BAD_REQUEST,
            AppError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ModelTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Text sent to HTTP clients. Upstream provider details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            AppError::ModelUnavailable(_) => "the assistant is temporarily unavailable".to_string(),
            other => other.to_string(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::MissingInput => "missing_input",
            AppError::ModelUnavailable(_) => "model_unavailable",
            AppError::ModelTimeout => "model_timeout",
        }
    }
}

impl From<ModelError> for AppError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Timeout => AppError::ModelTimeout,
            ModelError::Unavailable(msg) => AppError::ModelUnavailable(msg),
            ModelError::EmptyReply => {
                AppError::ModelUnavailable("model returned no content".to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.code().to_string(),
            message: self.public_message(),
        });
        (self.status(), body).into_response()
    }
}
