//! Registry storage ports
//!
//! The services speak to storage exclusively through these traits. The
//! internal adapter lives in `infra_db` (PostgreSQL); an in-memory mock for
//! tests lives in the `mock` module below.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_person::{PersonPort, PersonService};
//! use std::sync::Arc;
//!
//! let port: Arc<dyn PersonPort> = Arc::new(PostgresRegistryAdapter::new(pool));
//! let service = PersonService::new(port);
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PersonId, PortError};

use crate::address::Address;
use crate::person::Person;

/// Storage operations for person records
///
/// Fetches return the person with their address collection loaded.
#[async_trait]
pub trait PersonPort: DomainPort + HealthCheckable {
    /// Persists a new person
    async fn insert_person(&self, person: Person) -> Result<Person, PortError>;

    /// Fetches one person by id, or `None` when absent
    async fn fetch_person(&self, id: PersonId) -> Result<Option<Person>, PortError>;

    /// Fetches all people in storage order
    async fn fetch_people(&self) -> Result<Vec<Person>, PortError>;

    /// Fetches one zero-indexed page of people
    async fn fetch_people_page(&self, page: u32, page_size: u32) -> Result<Vec<Person>, PortError>;

    /// Persists changes to an existing person's scalar fields
    ///
    /// The address collection is not written through this operation.
    async fn update_person(&self, person: &Person) -> Result<Person, PortError>;
}

/// Storage operations for address records
#[async_trait]
pub trait AddressPort: DomainPort + HealthCheckable {
    /// Persists a new address
    async fn insert_address(&self, address: Address) -> Result<Address, PortError>;

    /// Fetches all addresses owned by a person, in storage order
    async fn fetch_addresses(&self, person_id: PersonId) -> Result<Vec<Address>, PortError>;

    /// Fetches one zero-indexed page of a person's addresses
    async fn fetch_addresses_page(
        &self,
        person_id: PersonId,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Address>, PortError>;

    /// Persists changes to an existing address
    async fn update_address(&self, address: &Address) -> Result<Address, PortError>;
}

/// In-memory adapter implementing both ports for testing
///
/// Mirrors the guarantees of the real store: insertion order is the storage
/// order, and a second main address for the same person is rejected the way
/// the database's partial unique index would reject it.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use tokio::sync::RwLock;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    /// In-memory registry storage
    #[derive(Debug, Default)]
    pub struct InMemoryRegistry {
        people: RwLock<Vec<Person>>,
        addresses: RwLock<Vec<Address>>,
    }

    impl InMemoryRegistry {
        /// Creates an empty registry
        pub fn new() -> Self {
            Self::default()
        }

        fn compose(person: &Person, addresses: &[Address]) -> Person {
            let mut person = person.clone();
            person.addresses = addresses
                .iter()
                .filter(|a| a.person_id == person.id)
                .cloned()
                .collect();
            person
        }

        fn another_main_exists(addresses: &[Address], address: &Address) -> bool {
            addresses
                .iter()
                .any(|a| a.person_id == address.person_id && a.main && a.id != address.id)
        }
    }

    impl DomainPort for InMemoryRegistry {}

    #[async_trait]
    impl HealthCheckable for InMemoryRegistry {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "in-memory-registry".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("In-memory adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl PersonPort for InMemoryRegistry {
        async fn insert_person(&self, person: Person) -> Result<Person, PortError> {
            let mut people = self.people.write().await;
            people.push(Person {
                addresses: Vec::new(),
                ..person.clone()
            });
            Ok(person)
        }

        async fn fetch_person(&self, id: PersonId) -> Result<Option<Person>, PortError> {
            let people = self.people.read().await;
            let addresses = self.addresses.read().await;
            Ok(people
                .iter()
                .find(|p| p.id == id)
                .map(|p| Self::compose(p, &addresses)))
        }

        async fn fetch_people(&self) -> Result<Vec<Person>, PortError> {
            let people = self.people.read().await;
            let addresses = self.addresses.read().await;
            Ok(people.iter().map(|p| Self::compose(p, &addresses)).collect())
        }

        async fn fetch_people_page(
            &self,
            page: u32,
            page_size: u32,
        ) -> Result<Vec<Person>, PortError> {
            let people = self.people.read().await;
            let addresses = self.addresses.read().await;
            Ok(people
                .iter()
                .skip(page as usize * page_size as usize)
                .take(page_size as usize)
                .map(|p| Self::compose(p, &addresses))
                .collect())
        }

        async fn update_person(&self, person: &Person) -> Result<Person, PortError> {
            let mut people = self.people.write().await;
            let stored = people
                .iter_mut()
                .find(|p| p.id == person.id)
                .ok_or_else(|| PortError::not_found("Person", person.id))?;
            stored.full_name = person.full_name.clone();
            stored.date_of_birth = person.date_of_birth;

            let addresses = self.addresses.read().await;
            Ok(Self::compose(stored, &addresses))
        }
    }

    #[async_trait]
    impl AddressPort for InMemoryRegistry {
        async fn insert_address(&self, address: Address) -> Result<Address, PortError> {
            let mut addresses = self.addresses.write().await;
            if address.main && Self::another_main_exists(&addresses, &address) {
                return Err(PortError::conflict(format!(
                    "person {} already has a main address",
                    address.person_id
                )));
            }
            addresses.push(address.clone());
            Ok(address)
        }

        async fn fetch_addresses(&self, person_id: PersonId) -> Result<Vec<Address>, PortError> {
            let addresses = self.addresses.read().await;
            Ok(addresses
                .iter()
                .filter(|a| a.person_id == person_id)
                .cloned()
                .collect())
        }

        async fn fetch_addresses_page(
            &self,
            person_id: PersonId,
            page: u32,
            page_size: u32,
        ) -> Result<Vec<Address>, PortError> {
            let addresses = self.addresses.read().await;
            Ok(addresses
                .iter()
                .filter(|a| a.person_id == person_id)
                .skip(page as usize * page_size as usize)
                .take(page_size as usize)
                .cloned()
                .collect())
        }

        async fn update_address(&self, address: &Address) -> Result<Address, PortError> {
            let mut addresses = self.addresses.write().await;
            if address.main && Self::another_main_exists(&addresses, address) {
                return Err(PortError::conflict(format!(
                    "person {} already has a main address",
                    address.person_id
                )));
            }
            let stored = addresses
                .iter_mut()
                .find(|a| a.id == address.id)
                .ok_or_else(|| PortError::not_found("Address", address.id))?;
            *stored = address.clone();
            Ok(address.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::InMemoryRegistry;
    use super::*;
    use chrono::NaiveDate;

    use crate::address::AddressDraft;
    use crate::person::PersonDraft;

    fn person() -> Person {
        Person::new(PersonDraft {
            full_name: "John Doe".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 6, 15).unwrap(),
        })
    }

    fn address(person_id: PersonId, main: bool) -> Address {
        Address::new(
            person_id,
            AddressDraft {
                street: "Main Street".to_string(),
                zip_code: "12345".to_string(),
                number: 42,
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                main,
            },
        )
    }

    #[tokio::test]
    async fn test_insert_and_fetch_person() {
        let registry = InMemoryRegistry::new();
        let stored = registry.insert_person(person()).await.unwrap();

        let fetched = registry.fetch_person(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, stored.id);
        assert_eq!(fetched.full_name, "John Doe");
    }

    #[tokio::test]
    async fn test_fetch_person_composes_addresses() {
        let registry = InMemoryRegistry::new();
        let stored = registry.insert_person(person()).await.unwrap();
        registry
            .insert_address(address(stored.id, true))
            .await
            .unwrap();

        let fetched = registry.fetch_person(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.addresses.len(), 1);
        assert!(fetched.main_address().is_some());
    }

    #[tokio::test]
    async fn test_second_main_rejected_like_the_store() {
        let registry = InMemoryRegistry::new();
        let stored = registry.insert_person(person()).await.unwrap();
        registry
            .insert_address(address(stored.id, true))
            .await
            .unwrap();

        let error = registry
            .insert_address(address(stored.id, true))
            .await
            .unwrap_err();
        assert!(error.is_conflict());
    }

    #[tokio::test]
    async fn test_update_missing_person_not_found() {
        let registry = InMemoryRegistry::new();
        let error = registry.update_person(&person()).await.unwrap_err();
        assert!(error.is_not_found());
    }
}
