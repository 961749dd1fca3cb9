//! API error handling
//!
//! [`ApiError`] is the single translation point from domain failures to
//! HTTP responses. Business failures keep their domain message in the
//! envelope; internal detail is logged here and never leaked.

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

use domain_person::RegistryError;

use crate::response::HttpResult;

/// Envelope message for any request-shape failure
pub const INVALID_ARGUMENTS_MESSAGE: &str =
    "Provided arguments are invalid, see data for details";

/// Envelope message for unmatched routes
pub const ENDPOINT_NOT_FOUND_MESSAGE: &str = "API endpoint not found";

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    /// Person or address lookup failed; carries the domain message
    #[error("{0}")]
    NotFound(String),

    /// Main-address rule violated; carries the domain message
    #[error("{0}")]
    Conflict(String),

    /// Request body or query string could not be parsed
    #[error("invalid request input: {0}")]
    MalformedBody(String),

    /// Field-level validation failed; wire field name -> message
    #[error("request validation failed")]
    Validation(HashMap<String, String>),

    /// Anything that should not reach the client
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RegistryError> for ApiError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::PersonNotFound(_) | RegistryError::AddressNotFound(_) => {
                ApiError::NotFound(error.to_string())
            }
            RegistryError::MainAddressConflict(_) => ApiError::Conflict(error.to_string()),
            RegistryError::Port(port_error) => ApiError::Internal(port_error.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, envelope) = match self {
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                HttpResult::failure(message, Value::Null),
            ),
            ApiError::Conflict(message) => (
                StatusCode::BAD_REQUEST,
                HttpResult::failure(message, Value::Null),
            ),
            ApiError::MalformedBody(detail) => (
                StatusCode::BAD_REQUEST,
                HttpResult::failure(INVALID_ARGUMENTS_MESSAGE, json!(detail)),
            ),
            ApiError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                HttpResult::failure(INVALID_ARGUMENTS_MESSAGE, json!(fields)),
            ),
            ApiError::Internal(detail) => {
                error!(detail = %detail, "internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    HttpResult::failure("Internal Server Error", Value::Null),
                )
            }
        };

        (status, Json(envelope)).into_response()
    }
}
