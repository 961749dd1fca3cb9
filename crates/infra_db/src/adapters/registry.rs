//! PostgreSQL registry adapter
//!
//! Implements the person and address ports on top of the repository layer.
//! The adapter owns both repositories: person reads compose the owner row
//! with its address rows, and person listings batch-load addresses in a
//! single query instead of one per person.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresRegistryAdapter;
//! use domain_person::{PersonPort, PersonService};
//! use std::sync::Arc;
//!
//! let adapter = Arc::new(PostgresRegistryAdapter::new(pool));
//! let people = PersonService::new(adapter.clone());
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{
    AdapterHealth, AddressId, DomainPort, HealthCheckResult, HealthCheckable, PersonId, PortError,
};
use domain_person::{Address, AddressPort, Person, PersonPort};

use crate::error::DatabaseError;
use crate::repositories::{
    AddressRepository, AddressRow, NewAddress, NewPerson, PersonRepository, PersonRow,
};

/// Name of the partial unique index enforcing the single-main-address rule
const MAIN_ADDRESS_INDEX: &str = "one_main_address_per_person";

/// PostgreSQL-backed implementation of the registry ports
#[derive(Debug, Clone)]
pub struct PostgresRegistryAdapter {
    people: PersonRepository,
    addresses: AddressRepository,
    pool: PgPool,
}

impl PostgresRegistryAdapter {
    /// Creates a new adapter over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            people: PersonRepository::new(pool.clone()),
            addresses: AddressRepository::new(pool.clone()),
            pool,
        }
    }

    async fn compose_person(&self, row: PersonRow) -> Result<Person, PortError> {
        let addresses = self
            .addresses
            .list_for_person(row.id)
            .await
            .map_err(db_to_port_error)?;
        Ok(row_to_person(row, addresses))
    }

    async fn compose_people(&self, rows: Vec<PersonRow>) -> Result<Vec<Person>, PortError> {
        let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
        let address_rows = self
            .addresses
            .list_for_people(&ids)
            .await
            .map_err(db_to_port_error)?;

        let mut grouped: HashMap<Uuid, Vec<AddressRow>> = HashMap::new();
        for row in address_rows {
            grouped.entry(row.person_id).or_default().push(row);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let addresses = grouped.remove(&row.id).unwrap_or_default();
                row_to_person(row, addresses)
            })
            .collect())
    }
}

impl DomainPort for PostgresRegistryAdapter {}

#[async_trait]
impl HealthCheckable for PostgresRegistryAdapter {
    /// Checks database connectivity with a trivial query
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: "postgres-registry-adapter".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: "postgres-registry-adapter".to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl PersonPort for PostgresRegistryAdapter {
    #[instrument(skip(self, person), fields(person_id = %person.id))]
    async fn insert_person(&self, person: Person) -> Result<Person, PortError> {
        debug!("inserting person");

        let row = self
            .people
            .insert(NewPerson {
                id: person.id.into(),
                full_name: person.full_name,
                date_of_birth: person.date_of_birth,
            })
            .await
            .map_err(db_to_port_error)?;

        Ok(row_to_person(row, Vec::new()))
    }

    #[instrument(skip(self), fields(person_id = %id))]
    async fn fetch_person(&self, id: PersonId) -> Result<Option<Person>, PortError> {
        debug!("fetching person");

        match self
            .people
            .get_by_id(id.into())
            .await
            .map_err(db_to_port_error)?
        {
            Some(row) => Ok(Some(self.compose_person(row).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn fetch_people(&self) -> Result<Vec<Person>, PortError> {
        let rows = self.people.list().await.map_err(db_to_port_error)?;
        self.compose_people(rows).await
    }

    #[instrument(skip(self))]
    async fn fetch_people_page(&self, page: u32, page_size: u32) -> Result<Vec<Person>, PortError> {
        let rows = self
            .people
            .list_page(page_size as i64, page as i64 * page_size as i64)
            .await
            .map_err(db_to_port_error)?;
        self.compose_people(rows).await
    }

    #[instrument(skip(self, person), fields(person_id = %person.id))]
    async fn update_person(&self, person: &Person) -> Result<Person, PortError> {
        debug!("updating person");

        let row = self
            .people
            .update(person.id.into(), &person.full_name, person.date_of_birth)
            .await
            .map_err(db_to_port_error)?
            .ok_or_else(|| PortError::not_found("Person", person.id))?;

        self.compose_person(row).await
    }
}

#[async_trait]
impl AddressPort for PostgresRegistryAdapter {
    #[instrument(skip(self, address), fields(address_id = %address.id, person_id = %address.person_id))]
    async fn insert_address(&self, address: Address) -> Result<Address, PortError> {
        debug!("inserting address");

        let row = self
            .addresses
            .insert(address_to_new(&address))
            .await
            .map_err(db_to_port_error)?;

        Ok(row_to_address(row))
    }

    #[instrument(skip(self), fields(person_id = %person_id))]
    async fn fetch_addresses(&self, person_id: PersonId) -> Result<Vec<Address>, PortError> {
        let rows = self
            .addresses
            .list_for_person(person_id.into())
            .await
            .map_err(db_to_port_error)?;

        Ok(rows.into_iter().map(row_to_address).collect())
    }

    #[instrument(skip(self), fields(person_id = %person_id))]
    async fn fetch_addresses_page(
        &self,
        person_id: PersonId,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Address>, PortError> {
        let rows = self
            .addresses
            .list_page_for_person(
                person_id.into(),
                page_size as i64,
                page as i64 * page_size as i64,
            )
            .await
            .map_err(db_to_port_error)?;

        Ok(rows.into_iter().map(row_to_address).collect())
    }

    #[instrument(skip(self, address), fields(address_id = %address.id))]
    async fn update_address(&self, address: &Address) -> Result<Address, PortError> {
        debug!("updating address");

        let row = self
            .addresses
            .update(&address_to_new(address))
            .await
            .map_err(db_to_port_error)?
            .ok_or_else(|| PortError::not_found("Address", address.id))?;

        Ok(row_to_address(row))
    }
}

/// Converts a database error to a port error
///
/// A unique violation of the main-address index is a data conflict; the
/// services translate it the same way they translate their own check.
fn db_to_port_error(e: DatabaseError) -> PortError {
    match e {
        DatabaseError::NotFound { entity, id } => PortError::not_found(entity, id),
        ref err if err.violates_constraint(MAIN_ADDRESS_INDEX) => {
            PortError::conflict("person already has a main address")
        }
        DatabaseError::DuplicateEntry { message, .. } => PortError::conflict(message),
        err if err.is_connection_error() => PortError::connection(err.to_string()),
        err => PortError::internal(err.to_string()),
    }
}

fn row_to_person(row: PersonRow, addresses: Vec<AddressRow>) -> Person {
    Person {
        id: PersonId::from(row.id),
        full_name: row.full_name,
        date_of_birth: row.date_of_birth,
        addresses: addresses.into_iter().map(row_to_address).collect(),
    }
}

fn row_to_address(row: AddressRow) -> Address {
    Address {
        id: AddressId::from(row.id),
        street: row.street,
        zip_code: row.zip_code,
        number: row.number,
        city: row.city,
        state: row.state,
        main: row.main,
        person_id: PersonId::from(row.person_id),
    }
}

fn address_to_new(address: &Address) -> NewAddress {
    NewAddress {
        id: address.id.into(),
        person_id: address.person_id.into(),
        street: address.street.clone(),
        zip_code: address.zip_code.clone(),
        number: address.number,
        city: address.city.clone(),
        state: address.state.clone(),
        main: address.main,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_index_violation_becomes_conflict() {
        let error = DatabaseError::DuplicateEntry {
            constraint: Some(MAIN_ADDRESS_INDEX.to_string()),
            message: "duplicate key value violates unique constraint".to_string(),
        };
        assert!(db_to_port_error(error).is_conflict());
    }

    #[test]
    fn test_not_found_maps_through() {
        let error = DatabaseError::not_found("Person", "PRS-123");
        assert!(db_to_port_error(error).is_not_found());
    }

    #[test]
    fn test_row_to_person_keeps_address_order() {
        let person_id = uuid::Uuid::now_v7();
        let now = Utc::now();
        let row = PersonRow {
            id: person_id,
            full_name: "Ada Lovelace".to_string(),
            date_of_birth: chrono::NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
            created_at: now,
            updated_at: now,
        };
        let addresses = vec![
            AddressRow {
                id: uuid::Uuid::now_v7(),
                person_id,
                street: "First Street".to_string(),
                zip_code: "11111".to_string(),
                number: 1,
                city: "London".to_string(),
                state: "LD".to_string(),
                main: true,
                created_at: now,
                updated_at: now,
            },
            AddressRow {
                id: uuid::Uuid::now_v7(),
                person_id,
                street: "Second Street".to_string(),
                zip_code: "22222".to_string(),
                number: 2,
                city: "London".to_string(),
                state: "LD".to_string(),
                main: false,
                created_at: now,
                updated_at: now,
            },
        ];

        let person = row_to_person(row, addresses);
        assert_eq!(person.addresses.len(), 2);
        assert_eq!(person.addresses[0].street, "First Street");
        assert_eq!(person.main_address().map(|a| a.street.as_str()), Some("First Street"));
    }
}
