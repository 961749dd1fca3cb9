//! Person Registry Domain
//!
//! This crate manages person records and the addresses they own.
//!
//! # Ownership Model
//!
//! A person owns a collection of addresses. Ownership is one-directional:
//! an address carries only its owner's identifier, and the reverse
//! direction (all addresses of a person) is an explicit query against the
//! storage port. An address cannot exist without a person, and removing a
//! person removes its addresses with it.
//!
//! # The Main-Address Rule
//!
//! At most one address per person may be flagged `main` at any time. The
//! services enforce the rule on both create and update; on update, the
//! address being saved is excluded from the conflict check so it can be
//! re-saved as main without conflicting with itself.
//!
//! # Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use domain_person::person::{Person, PersonDraft};
//!
//! let person = Person::new(PersonDraft {
//!     full_name: "Jane Doe".to_string(),
//!     date_of_birth: NaiveDate::from_ymd_opt(1976, 7, 1).unwrap(),
//! });
//! assert!(person.main_address().is_none());
//! ```

pub mod address;
pub mod error;
pub mod person;
pub mod ports;
pub mod service;

pub use address::{Address, AddressDraft};
pub use error::RegistryError;
pub use person::{Person, PersonDraft};
pub use ports::{AddressPort, PersonPort};
pub use service::{AddressService, PersonService, PAGE_SIZE};
