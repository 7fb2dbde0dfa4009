use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Configuration error: {0}")]
    #[diagnostic(code(energycal::config), help("check the PORT and HOST environment variables"))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(energycal::io))]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    #[diagnostic(code(energycal::other))]
    Other(String),
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Errors returned to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be read or decoded as JSON
    #[error("{0}")]
    InvalidBody(String),
}

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        warn!(status = %status, "Rejecting request: {}", self);

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
