//! Registry domain errors
//!
//! All business-rule failures originate here and travel unmodified to the
//! API boundary, where the error translator maps them to HTTP responses.
//! The message text is part of the wire contract.

use thiserror::Error;

use core_kernel::{AddressId, PersonId, PortError};

/// Errors raised by the registry services
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No person exists with the given identifier
    #[error("Person with id {0} was not found")]
    PersonNotFound(PersonId),

    /// The person exists but owns no address with the given identifier
    #[error("Address with id {0} was not found")]
    AddressNotFound(AddressId),

    /// The person already has an address flagged as main
    #[error("Person with id {0} already have a main address")]
    MainAddressConflict(PersonId),

    /// The storage port failed
    #[error(transparent)]
    Port(#[from] PortError),
}

impl RegistryError {
    /// Returns true for either not-found variant
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RegistryError::PersonNotFound(_) | RegistryError::AddressNotFound(_)
        )
    }
}
