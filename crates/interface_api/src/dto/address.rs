//! Address DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_person::{Address, AddressDraft};

use super::not_blank;

/// Incoming address payload for create and update
///
/// String fields and `number` are required; `main` defaults to `false`
/// when omitted.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    #[serde(default)]
    #[validate(
        required(message = "Cannot be null or empty"),
        custom(function = not_blank, message = "Cannot be null or empty")
    )]
    pub street: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Cannot be null or empty"),
        custom(function = not_blank, message = "Cannot be null or empty")
    )]
    pub zip_code: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Cannot be null or empty"),
        range(min = 1, message = "Cannot be less than 1")
    )]
    pub number: Option<i32>,

    #[serde(default)]
    #[validate(
        required(message = "Cannot be null or empty"),
        custom(function = not_blank, message = "Cannot be null or empty")
    )]
    pub city: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Cannot be null or empty"),
        custom(function = not_blank, message = "Cannot be null or empty")
    )]
    pub state: Option<String>,

    #[serde(default)]
    pub main: bool,
}

impl AddressRequest {
    /// Converts a validated request into a domain draft
    ///
    /// `None` only when called on an unvalidated request.
    pub fn into_draft(self) -> Option<AddressDraft> {
        Some(AddressDraft {
            street: self.street?,
            zip_code: self.zip_code?,
            number: self.number?,
            city: self.city?,
            state: self.state?,
            main: self.main,
        })
    }
}

/// Outgoing address payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub id: String,
    pub street: String,
    pub zip_code: String,
    pub number: i32,
    pub city: String,
    pub state: String,
    pub main: bool,
    pub person_id: String,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id.to_string(),
            street: address.street,
            zip_code: address.zip_code,
            number: address.number,
            city: address.city,
            state: address.state,
            main: address.main,
            person_id: address.person_id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_body() -> serde_json::Value {
        json!({
            "street": "Paulista Avenue",
            "zipCode": "01310-100",
            "number": 1578,
            "city": "Sao Paulo",
            "state": "SP",
            "main": true
        })
    }

    #[test]
    fn test_valid_request_passes() {
        let request: AddressRequest = serde_json::from_value(full_body()).unwrap();
        assert!(request.validate().is_ok());

        let draft = request.into_draft().unwrap();
        assert!(draft.main);
        assert_eq!(draft.number, 1578);
    }

    #[test]
    fn test_negative_number_rejected() {
        let mut body = full_body();
        body["number"] = json!(-1);
        let request: AddressRequest = serde_json::from_value(body).unwrap();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        let message = fields["number"][0].message.as_ref().unwrap();
        assert_eq!(message, "Cannot be less than 1");
    }

    #[test]
    fn test_main_defaults_to_false() {
        let mut body = full_body();
        body.as_object_mut().unwrap().remove("main");
        let request: AddressRequest = serde_json::from_value(body).unwrap();
        assert!(request.validate().is_ok());
        assert!(!request.main);
    }

    #[test]
    fn test_blank_strings_collect_messages() {
        let body = json!({
            "street": "",
            "zipCode": "  ",
            "number": 1,
            "city": "Sao Paulo",
            "state": "SP"
        });
        let request: AddressRequest = serde_json::from_value(body).unwrap();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("street"));
        assert!(fields.contains_key("zip_code"));
        assert!(!fields.contains_key("city"));
    }
}
