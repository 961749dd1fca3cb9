//! Address repository implementation
//!
//! Database access for address records. Addresses always belong to a person
//! and every query here is scoped by `person_id`, except the batch loader
//! used to compose full person listings.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

/// Repository for address records
#[derive(Debug, Clone)]
pub struct AddressRepository {
    pool: PgPool,
}

impl AddressRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new address and returns the stored row
    ///
    /// A second main address for the same person violates the
    /// `one_main_address_per_person` index and surfaces as
    /// [`DatabaseError::DuplicateEntry`].
    pub async fn insert(&self, address: NewAddress) -> Result<AddressRow, DatabaseError> {
        let row = sqlx::query_as::<_, AddressRow>(
            r#"
            INSERT INTO addresses (id, person_id, street, zip_code, number, city, state, main)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, person_id, street, zip_code, number, city, state, main,
                      created_at, updated_at
            "#,
        )
        .bind(address.id)
        .bind(address.person_id)
        .bind(&address.street)
        .bind(&address.zip_code)
        .bind(address.number)
        .bind(&address.city)
        .bind(&address.state)
        .bind(address.main)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Lists every address a person owns, in insertion order
    pub async fn list_for_person(&self, person_id: Uuid) -> Result<Vec<AddressRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT id, person_id, street, zip_code, number, city, state, main,
                   created_at, updated_at
            FROM addresses
            WHERE person_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(person_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Lists one page of a person's addresses, in insertion order
    pub async fn list_page_for_person(
        &self,
        person_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AddressRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT id, person_id, street, zip_code, number, city, state, main,
                   created_at, updated_at
            FROM addresses
            WHERE person_id = $1
            ORDER BY created_at, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(person_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Batch-loads the addresses of many people in one round trip
    pub async fn list_for_people(
        &self,
        person_ids: &[Uuid],
    ) -> Result<Vec<AddressRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT id, person_id, street, zip_code, number, city, state, main,
                   created_at, updated_at
            FROM addresses
            WHERE person_id = ANY($1)
            ORDER BY created_at, id
            "#,
        )
        .bind(person_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Overwrites every mutable field of an address
    ///
    /// Returns `None` when no address has the id.
    pub async fn update(&self, address: &NewAddress) -> Result<Option<AddressRow>, DatabaseError> {
        let row = sqlx::query_as::<_, AddressRow>(
            r#"
            UPDATE addresses
            SET street = $2, zip_code = $3, number = $4, city = $5, state = $6,
                main = $7, updated_at = now()
            WHERE id = $1
            RETURNING id, person_id, street, zip_code, number, city, state, main,
                      created_at, updated_at
            "#,
        )
        .bind(address.id)
        .bind(&address.street)
        .bind(&address.zip_code)
        .bind(address.number)
        .bind(&address.city)
        .bind(&address.state)
        .bind(address.main)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}

/// Database row representation of an address
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AddressRow {
    pub id: Uuid,
    pub person_id: Uuid,
    pub street: String,
    pub zip_code: String,
    pub number: i32,
    pub city: String,
    pub state: String,
    pub main: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating or overwriting an address
#[derive(Debug, Clone)]
pub struct NewAddress {
    pub id: Uuid,
    pub person_id: Uuid,
    pub street: String,
    pub zip_code: String,
    pub number: i32,
    pub city: String,
    pub state: String,
    pub main: bool,
}
