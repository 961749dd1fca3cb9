//! Address handlers
//!
//! Every route here is scoped by the owning person's id; the double-id
//! routes carry the address id first: `/{addressId}/person/{personId}`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::dto::{AddressRequest, AddressResponse};
use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::response::HttpResult;
use crate::AppState;

use super::{parse_address_id, parse_person_id, to_data, PageQuery};

/// Creates an address for a person
pub async fn create_address(
    State(state): State<AppState>,
    Path(person_id): Path<String>,
    ValidatedJson(request): ValidatedJson<AddressRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let person_id = parse_person_id(&person_id)?;
    let draft = request
        .into_draft()
        .ok_or_else(|| ApiError::Internal("validated request missing fields".to_string()))?;

    let address = state.addresses.create(person_id, draft).await?;

    Ok((
        StatusCode::CREATED,
        Json(HttpResult::success(
            "Created address success",
            to_data(AddressResponse::from(address))?,
        )),
    ))
}

/// Lists a person's addresses, one page at a time when `?page=N` is present
pub async fn list_addresses(
    State(state): State<AppState>,
    Path(person_id): Path<String>,
    query: PageQuery,
) -> Result<impl IntoResponse, ApiError> {
    let person_id = parse_person_id(&person_id)?;

    let addresses = match query.page {
        Some(page) => state.addresses.find_all_paged(person_id, page).await?,
        None => state.addresses.find_all(person_id).await?,
    };

    let responses: Vec<AddressResponse> =
        addresses.into_iter().map(AddressResponse::from).collect();

    Ok(Json(HttpResult::success(
        "Find all addresses success",
        to_data(responses)?,
    )))
}

/// Gets one of a person's addresses
pub async fn get_address(
    State(state): State<AppState>,
    Path((address_id, person_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let person_id = parse_person_id(&person_id)?;
    let address_id = parse_address_id(&address_id)?;

    let address = state.addresses.find_one(person_id, address_id).await?;

    Ok(Json(HttpResult::success(
        "Find one address success",
        to_data(AddressResponse::from(address))?,
    )))
}

/// Updates one of a person's addresses
pub async fn update_address(
    State(state): State<AppState>,
    Path((address_id, person_id)): Path<(String, String)>,
    ValidatedJson(request): ValidatedJson<AddressRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let person_id = parse_person_id(&person_id)?;
    let address_id = parse_address_id(&address_id)?;
    let draft = request
        .into_draft()
        .ok_or_else(|| ApiError::Internal("validated request missing fields".to_string()))?;

    let address = state.addresses.update(person_id, address_id, draft).await?;

    Ok(Json(HttpResult::success(
        "Updated address success",
        to_data(AddressResponse::from(address))?,
    )))
}
