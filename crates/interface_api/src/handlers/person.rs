//! Person handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::dto::{PersonRequest, PersonResponse};
use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::response::HttpResult;
use crate::AppState;

use super::{parse_person_id, to_data, PageQuery};

/// Creates a new person
pub async fn create_person(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<PersonRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = request
        .into_draft()
        .ok_or_else(|| ApiError::Internal("validated request missing fields".to_string()))?;

    let person = state.people.create(draft).await?;

    Ok((
        StatusCode::CREATED,
        Json(HttpResult::success(
            "Created person success",
            to_data(PersonResponse::from(person))?,
        )),
    ))
}

/// Lists people, one page at a time when `?page=N` is present
pub async fn list_people(
    State(state): State<AppState>,
    query: PageQuery,
) -> Result<impl IntoResponse, ApiError> {
    let people = match query.page {
        Some(page) => state.people.find_all_paged(page).await?,
        None => state.people.find_all().await?,
    };

    let responses: Vec<PersonResponse> = people.into_iter().map(PersonResponse::from).collect();

    Ok(Json(HttpResult::success(
        "Find all persons success",
        to_data(responses)?,
    )))
}

/// Gets a person by id
pub async fn get_person(
    State(state): State<AppState>,
    Path(person_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_person_id(&person_id)?;
    let person = state.people.find_one(id).await?;

    Ok(Json(HttpResult::success(
        "Find one person success",
        to_data(PersonResponse::from(person))?,
    )))
}

/// Updates a person's name and date of birth
pub async fn update_person(
    State(state): State<AppState>,
    Path(person_id): Path<String>,
    ValidatedJson(request): ValidatedJson<PersonRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_person_id(&person_id)?;
    let draft = request
        .into_draft()
        .ok_or_else(|| ApiError::Internal("validated request missing fields".to_string()))?;

    let person = state.people.update(id, draft).await?;

    Ok(Json(HttpResult::success(
        "Updated person success",
        to_data(PersonResponse::from(person))?,
    )))
}
