//! Repository implementations for database access

pub mod address;
pub mod person;

pub use address::{AddressRepository, AddressRow, NewAddress};
pub use person::{NewPerson, PersonRepository, PersonRow};
