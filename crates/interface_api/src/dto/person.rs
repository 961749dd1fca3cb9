//! Person DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use chrono::NaiveDate;
use core_kernel::temporal::wire_date;
use domain_person::{Person, PersonDraft};

use super::address::AddressResponse;
use super::{not_blank, BLANK_FIELD_MESSAGE};

/// Incoming person payload for create and update
///
/// Both fields are required; they are `Option` only so missing and null
/// values land in the validation map instead of a deserialization error.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PersonRequest {
    #[serde(default)]
    #[validate(
        required(message = "Cannot be null or empty"),
        custom(function = not_blank, message = "Cannot be null or empty")
    )]
    pub full_name: Option<String>,

    #[serde(default, deserialize_with = "wire_date::option::deserialize")]
    #[validate(required(message = "Cannot be null or empty"))]
    pub date_of_birth: Option<NaiveDate>,
}

impl PersonRequest {
    /// Converts a validated request into a domain draft
    ///
    /// `None` only when called on an unvalidated request.
    pub fn into_draft(self) -> Option<PersonDraft> {
        Some(PersonDraft {
            full_name: self.full_name?,
            date_of_birth: self.date_of_birth?,
        })
    }
}

/// Outgoing person payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponse {
    pub id: String,
    pub full_name: String,
    #[serde(with = "wire_date")]
    pub date_of_birth: NaiveDate,
    pub main_address: Option<AddressResponse>,
}

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        let main_address = person.main_address().cloned().map(AddressResponse::from);
        Self {
            id: person.id.to_string(),
            full_name: person.full_name,
            date_of_birth: person.date_of_birth,
            main_address,
        }
    }
}
