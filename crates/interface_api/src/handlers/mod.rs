//! Request handlers

pub mod address;
pub mod health;
pub mod person;

use axum::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use core_kernel::{AddressId, PersonId};

use crate::error::{ApiError, ENDPOINT_NOT_FOUND_MESSAGE};
use crate::response::HttpResult;

/// Optional `?page=N` query for listing endpoints
///
/// Extracts itself so a bad value (`?page=abc`) comes back in the same
/// envelope as every other malformed input, not axum's plain-text 400.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

#[async_trait]
impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<Self>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;
        Ok(query)
    }
}

/// Fallback for unmatched routes
pub async fn endpoint_not_found() -> (StatusCode, Json<HttpResult>) {
    (
        StatusCode::NOT_FOUND,
        Json(HttpResult::failure(ENDPOINT_NOT_FOUND_MESSAGE, Value::Null)),
    )
}

/// Parses a person id from a path segment
///
/// An unparsable id can never match a stored person, so it reports the
/// same not-found message a missing person would.
pub(crate) fn parse_person_id(raw: &str) -> Result<PersonId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("Person with id {raw} was not found")))
}

/// Parses an address id from a path segment
pub(crate) fn parse_address_id(raw: &str) -> Result<AddressId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("Address with id {raw} was not found")))
}

/// Serializes a response payload into envelope data
pub(crate) fn to_data<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_person_id_accepts_prefixed_form() {
        let id = PersonId::new_v7();
        assert_eq!(parse_person_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_parse_person_id_rejects_garbage() {
        let error = parse_person_id("not-an-id").unwrap_err();
        match error {
            ApiError::NotFound(message) => {
                assert_eq!(message, "Person with id not-an-id was not found");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
