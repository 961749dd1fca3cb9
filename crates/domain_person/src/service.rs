//! Person registry domain services
//!
//! `PersonService` and `AddressService` carry the business rules of the
//! registry: existence checks, the single-main-address rule, and fixed-size
//! pagination. Both are thin over their storage ports and hold no state of
//! their own, so they can be shared behind `Arc` across request handlers.

use std::sync::Arc;

use tracing::{debug, info};

use core_kernel::{AddressId, HealthCheckResult, PersonId, PortError};

use crate::address::{Address, AddressDraft};
use crate::error::RegistryError;
use crate::person::{Person, PersonDraft};
use crate::ports::{AddressPort, PersonPort};

/// Fixed page size for all paged listings
pub const PAGE_SIZE: u32 = 5;

/// Service for managing person records
pub struct PersonService {
    port: Arc<dyn PersonPort>,
}

impl PersonService {
    /// Creates a new person service backed by the given port
    pub fn new(port: Arc<dyn PersonPort>) -> Self {
        Self { port }
    }

    /// Creates a person from a validated draft
    ///
    /// The new person starts with an empty address collection.
    pub async fn create(&self, draft: PersonDraft) -> Result<Person, RegistryError> {
        let person = Person::new(draft);
        let stored = self.port.insert_person(person).await?;
        info!(person_id = %stored.id, "person created");
        Ok(stored)
    }

    /// Fetches one person with their addresses
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::PersonNotFound`] when no person has the id.
    pub async fn find_one(&self, id: PersonId) -> Result<Person, RegistryError> {
        self.port
            .fetch_person(id)
            .await?
            .ok_or(RegistryError::PersonNotFound(id))
    }

    /// Fetches every person in storage order
    pub async fn find_all(&self) -> Result<Vec<Person>, RegistryError> {
        Ok(self.port.fetch_people().await?)
    }

    /// Fetches one zero-indexed page of people
    ///
    /// Pages past the end of the collection are empty, not an error.
    pub async fn find_all_paged(&self, page: u32) -> Result<Vec<Person>, RegistryError> {
        debug!(page, page_size = PAGE_SIZE, "listing people page");
        Ok(self.port.fetch_people_page(page, PAGE_SIZE).await?)
    }

    /// Overwrites a person's name and date of birth
    ///
    /// The address collection is untouched; a draft omitting a field never
    /// reaches this method, so every update is a full overwrite.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::PersonNotFound`] when no person has the id.
    pub async fn update(&self, id: PersonId, draft: PersonDraft) -> Result<Person, RegistryError> {
        let mut person = self.find_one(id).await?;
        person.apply(draft);
        let stored = self.port.update_person(&person).await?;
        info!(person_id = %id, "person updated");
        Ok(stored)
    }

    /// Reports the health of the underlying storage adapter
    pub async fn health(&self) -> HealthCheckResult {
        self.port.health_check().await
    }
}

/// Service for managing a person's addresses
///
/// Every operation is scoped to an owning person; an address is never
/// reachable except through its owner.
pub struct AddressService {
    persons: Arc<PersonService>,
    port: Arc<dyn AddressPort>,
}

impl AddressService {
    /// Creates a new address service
    pub fn new(persons: Arc<PersonService>, port: Arc<dyn AddressPort>) -> Self {
        Self { persons, port }
    }

    /// Creates an address for a person
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::PersonNotFound`] when the owner does not
    /// exist, and [`RegistryError::MainAddressConflict`] when the draft is
    /// flagged main and the person already has a main address.
    pub async fn create(
        &self,
        person_id: PersonId,
        draft: AddressDraft,
    ) -> Result<Address, RegistryError> {
        let person = self.persons.find_one(person_id).await?;
        if draft.main && person.main_address().is_some() {
            return Err(RegistryError::MainAddressConflict(person_id));
        }

        // A concurrent writer can slip past the check above; the store's
        // unique index reports that race as a conflict.
        let address = Address::new(person_id, draft);
        let stored = self
            .port
            .insert_address(address)
            .await
            .map_err(|e| conflict_or_port(e, person_id))?;
        info!(address_id = %stored.id, person_id = %person_id, "address created");
        Ok(stored)
    }

    /// Fetches one of a person's addresses
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::PersonNotFound`] when the owner does not
    /// exist, and [`RegistryError::AddressNotFound`] when the person owns no
    /// address with the id.
    pub async fn find_one(
        &self,
        person_id: PersonId,
        address_id: AddressId,
    ) -> Result<Address, RegistryError> {
        let person = self.persons.find_one(person_id).await?;
        person
            .addresses
            .into_iter()
            .find(|a| a.id == address_id)
            .ok_or(RegistryError::AddressNotFound(address_id))
    }

    /// Fetches every address a person owns, in storage order
    pub async fn find_all(&self, person_id: PersonId) -> Result<Vec<Address>, RegistryError> {
        self.persons.find_one(person_id).await?;
        Ok(self.port.fetch_addresses(person_id).await?)
    }

    /// Fetches one zero-indexed page of a person's addresses
    pub async fn find_all_paged(
        &self,
        person_id: PersonId,
        page: u32,
    ) -> Result<Vec<Address>, RegistryError> {
        self.persons.find_one(person_id).await?;
        debug!(person_id = %person_id, page, page_size = PAGE_SIZE, "listing addresses page");
        Ok(self.port.fetch_addresses_page(person_id, page, PAGE_SIZE).await?)
    }

    /// Overwrites every mutable field of an address
    ///
    /// The conflict check only fires when the incoming draft is flagged main:
    /// some *other* address of the same person must not already hold the
    /// flag. Re-saving the current main address as main stays legal, as does
    /// demoting it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::PersonNotFound`], [`RegistryError::AddressNotFound`],
    /// or [`RegistryError::MainAddressConflict`].
    pub async fn update(
        &self,
        person_id: PersonId,
        address_id: AddressId,
        draft: AddressDraft,
    ) -> Result<Address, RegistryError> {
        let person = self.persons.find_one(person_id).await?;
        let mut address = person
            .addresses
            .iter()
            .find(|a| a.id == address_id)
            .cloned()
            .ok_or(RegistryError::AddressNotFound(address_id))?;

        if draft.main {
            let other_main = person
                .addresses
                .iter()
                .any(|a| a.main && a.id != address_id);
            if other_main {
                return Err(RegistryError::MainAddressConflict(person_id));
            }
        }

        address.apply(draft);
        let stored = self
            .port
            .update_address(&address)
            .await
            .map_err(|e| conflict_or_port(e, person_id))?;
        info!(address_id = %address_id, person_id = %person_id, "address updated");
        Ok(stored)
    }
}

fn conflict_or_port(error: PortError, person_id: PersonId) -> RegistryError {
    if error.is_conflict() {
        RegistryError::MainAddressConflict(person_id)
    } else {
        RegistryError::Port(error)
    }
}
