//! Error type for the HTTP handlers and its mapping onto responses.

use std::error::Error;
use std::fmt;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::movie::ValidationErrors;
use crate::store::StoreError;

/// Every way a movie request can fail.
#[derive(Debug)]
pub enum ApiError {
    /// The payload did not satisfy the movie schema.
    Validation(ValidationErrors),
    /// Nothing matched; carries the client-facing message.
    NotFound(String),
    /// The body was missing or was not JSON.
    MalformedBody(String),
    /// The store itself failed.
    Store(StoreError),
}

impl ApiError {
    pub fn movie_not_found(id: &str) -> Self {
        ApiError::NotFound(format!("Movie {} not found.", id))
    }

    pub fn genre_not_found(genre: &str) -> Self {
        ApiError::NotFound(format!("Movies by {} not found.", genre))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(errors) => write!(f, "{}", errors),
            ApiError::NotFound(message) => f.write_str(message),
            ApiError::MalformedBody(message) => write!(f, "malformed body: {}", message),
            ApiError::Store(e) => write!(f, "store error: {}", e),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::Validation(e) => Some(e),
            ApiError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::Validation(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Validation(errors) => json!({ "error": errors }),
            ApiError::NotFound(message) => json!({ "message": message }),
            ApiError::MalformedBody(_) => json!({ "error": self.to_string() }),
            ApiError::Store(e) => {
                tracing::error!(error = %e, "movie store failure");
                json!({ "error": self.to_string() })
            }
        };
        (status, Json(body)).into_response()
    }
}
