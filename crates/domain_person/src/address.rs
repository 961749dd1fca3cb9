//! Address entity

use serde::{Deserialize, Serialize};

use core_kernel::{AddressId, PersonId};

/// A postal address owned by a person
///
/// The owner reference is set exactly once, at creation, and never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,
    pub street: String,
    pub zip_code: String,
    pub number: i32,
    pub city: String,
    pub state: String,
    /// Whether this is the person's main address
    pub main: bool,
    /// Identifier of the owning person
    pub person_id: PersonId,
}

/// Mutable address fields as supplied by a caller
///
/// Carries neither an identifier nor an owner reference; both are assigned
/// downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressDraft {
    pub street: String,
    pub zip_code: String,
    pub number: i32,
    pub city: String,
    pub state: String,
    pub main: bool,
}

impl Address {
    /// Creates a new address under the given owner, assigning a fresh identifier
    pub fn new(person_id: PersonId, draft: AddressDraft) -> Self {
        Self {
            id: AddressId::new_v7(),
            street: draft.street,
            zip_code: draft.zip_code,
            number: draft.number,
            city: draft.city,
            state: draft.state,
            main: draft.main,
            person_id,
        }
    }

    /// Overwrites all mutable fields from a draft
    ///
    /// The identifier and owner reference are left as they are.
    pub fn apply(&mut self, draft: AddressDraft) {
        self.street = draft.street;
        self.zip_code = draft.zip_code;
        self.number = draft.number;
        self.city = draft.city;
        self.state = draft.state;
        self.main = draft.main;
    }
}
