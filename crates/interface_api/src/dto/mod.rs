//! Request and response DTOs
//!
//! Request types carry `validator` rules mirroring the wire contract:
//! string fields reject null and blank values, `number` rejects values
//! below 1, and the birth date is required and strictly `dd/MM/yyyy`.

pub mod address;
pub mod person;

pub use address::{AddressRequest, AddressResponse};
pub use person::{PersonRequest, PersonResponse};

use validator::ValidationError;

/// Message for null, missing, or blank fields
pub const BLANK_FIELD_MESSAGE: &str = "Cannot be null or empty";

/// Message for numbers below the minimum
pub const BELOW_MINIMUM_MESSAGE: &str = "Cannot be less than 1";

/// Rejects empty and whitespace-only strings
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Ada").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
    }
}
