//! Validated JSON extraction
//!
//! `ValidatedJson<T>` deserializes the body and runs `validator` rules in
//! one step, so handlers only ever see well-formed requests. Both failure
//! modes surface as [`ApiError`] with the uniform envelope.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use core_kernel::INVALID_DATE_MESSAGE;

use crate::error::ApiError;

/// JSON extractor that also runs field validation
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let detail = rejection.body_text();
                // Strict-date deserialization embeds its own message; keep
                // it verbatim instead of the serde path noise around it.
                if detail.contains(INVALID_DATE_MESSAGE) {
                    ApiError::MalformedBody(INVALID_DATE_MESSAGE.to_string())
                } else {
                    ApiError::MalformedBody(detail)
                }
            })?;

        value.validate().map_err(validation_to_api_error)?;

        Ok(ValidatedJson(value))
    }
}

/// Flattens `validator` errors into a wire-field -> message map
fn validation_to_api_error(errors: validator::ValidationErrors) -> ApiError {
    let fields = errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let message = errors
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| "Invalid value".to_string());
            (snake_to_camel(field), message)
        })
        .collect();

    ApiError::Validation(fields)
}

/// Converts a Rust field name to its wire (camelCase) form
fn snake_to_camel(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
