//! Person entity
//!
//! A person is the aggregate root of the registry: it carries the scalar
//! fields supplied by clients plus the addresses it owns. Addresses are
//! loaded with the person so that lookups and the main-address resolution
//! can scan the collection without further storage round trips.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::PersonId;

use crate::address::Address;

/// A registered person and the addresses they own
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier, assigned at creation and immutable afterwards
    pub id: PersonId,
    /// Full legal name
    pub full_name: String,
    /// Date of birth (`dd/MM/yyyy` on the wire)
    pub date_of_birth: NaiveDate,
    /// Addresses owned by this person
    #[serde(default)]
    pub addresses: Vec<Address>,
}

/// Scalar person fields as supplied by a caller
///
/// A draft never carries an identifier; that is assigned when the entity
/// is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonDraft {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
}

impl Person {
    /// Creates a new person from a draft, assigning a fresh identifier
    pub fn new(draft: PersonDraft) -> Self {
        Self {
            id: PersonId::new_v7(),
            full_name: draft.full_name,
            date_of_birth: draft.date_of_birth,
            addresses: Vec::new(),
        }
    }

    /// Returns the person's main address, if one is flagged
    ///
    /// Defined as the first address in the collection with `main = true`;
    /// explicitly optional, never a placeholder value.
    pub fn main_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.main)
    }

    /// Overwrites the fields a person update is allowed to touch
    ///
    /// Only `full_name` and `date_of_birth` change; the identifier and the
    /// address collection are left as they are.
    pub fn apply(&mut self, draft: PersonDraft) {
        self.full_name = draft.full_name;
        self.date_of_birth = draft.date_of_birth;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::AddressDraft;

    fn draft() -> PersonDraft {
        PersonDraft {
            full_name: "Jane Doe".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1976, 7, 1).unwrap(),
        }
    }

    #[test]
    fn test_new_person_has_no_addresses() {
        let person = Person::new(draft());
        assert!(person.addresses.is_empty());
        assert!(person.main_address().is_none());
    }

    #[test]
    fn test_main_address_picks_first_flagged() {
        let mut person = Person::new(draft());
        let plain = Address::new(
            person.id,
            AddressDraft {
                street: "Baker Street".into(),
                zip_code: "NW1".into(),
                number: 221,
                city: "London".into(),
                state: "LDN".into(),
                main: false,
            },
        );
        let main = Address::new(
            person.id,
            AddressDraft {
                street: "Main Street".into(),
                zip_code: "12345".into(),
                number: 1,
                city: "Springfield".into(),
                state: "IL".into(),
                main: true,
            },
        );
        person.addresses.push(plain);
        person.addresses.push(main.clone());

        assert_eq!(person.main_address().map(|a| a.id), Some(main.id));
    }

    #[test]
    fn test_apply_leaves_id_and_addresses() {
        let mut person = Person::new(draft());
        let id = person.id;
        person.addresses.push(Address::new(
            person.id,
            AddressDraft {
                street: "Baker Street".into(),
                zip_code: "NW1".into(),
                number: 221,
                city: "London".into(),
                state: "LDN".into(),
                main: false,
            },
        ));

        person.apply(PersonDraft {
            full_name: "Janet Doe".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1980, 1, 2).unwrap(),
        });

        assert_eq!(person.id, id);
        assert_eq!(person.full_name, "Janet Doe");
        assert_eq!(person.addresses.len(), 1);
    }
}
