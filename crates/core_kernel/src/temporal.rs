//! Wire date handling
//!
//! Birth dates cross the API boundary as `dd/MM/yyyy` text. This module owns
//! the format string, the fixed error message surfaced to clients when a date
//! fails to parse, and serde helpers for both required and optional dates.

use chrono::NaiveDate;

/// chrono pattern for the `dd/MM/yyyy` wire format
pub const WIRE_DATE_FORMAT: &str = "%d/%m/%Y";

/// Message returned to clients when a wire date cannot be parsed
pub const INVALID_DATE_MESSAGE: &str =
    "Invalid date format. Follow the following pattern: dd/MM/yyyy";

/// Renders a date in the wire format
pub fn format_wire_date(date: NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}

/// Parses a date from the wire format
pub fn parse_wire_date(text: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(text, WIRE_DATE_FORMAT)
}

/// Serde helpers for `NaiveDate` fields in the wire format
///
/// ```rust,ignore
/// #[derive(Serialize)]
/// struct Response {
///     #[serde(with = "core_kernel::temporal::wire_date")]
///     date_of_birth: NaiveDate,
/// }
/// ```
pub mod wire_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::{format_wire_date, parse_wire_date, INVALID_DATE_MESSAGE};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_wire_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_wire_date(&text).map_err(|_| de::Error::custom(INVALID_DATE_MESSAGE))
    }

    /// Variant for `Option<NaiveDate>` fields: `null` and absent map to
    /// `None`, anything present must parse.
    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => serializer.serialize_str(&format_wire_date(*date)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            let text = Option::<String>::deserialize(deserializer)?;
            text.map(|text| parse_wire_date(&text).map_err(|_| de::Error::custom(INVALID_DATE_MESSAGE)))
                .transpose()
        }
    }
}
