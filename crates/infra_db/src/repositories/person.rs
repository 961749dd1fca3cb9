//! Person repository implementation
//!
//! Database access for person records. Queries are bound at runtime so the
//! crate builds without a live database; row shapes are checked through
//! `sqlx::FromRow`.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

/// Repository for person records
#[derive(Debug, Clone)]
pub struct PersonRepository {
    pool: PgPool,
}

impl PersonRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new person and returns the stored row
    pub async fn insert(&self, person: NewPerson) -> Result<PersonRow, DatabaseError> {
        let row = sqlx::query_as::<_, PersonRow>(
            r#"
            INSERT INTO people (id, full_name, date_of_birth)
            VALUES ($1, $2, $3)
            RETURNING id, full_name, date_of_birth, created_at, updated_at
            "#,
        )
        .bind(person.id)
        .bind(&person.full_name)
        .bind(person.date_of_birth)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves a person by id, or `None` when absent
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<PersonRow>, DatabaseError> {
        let row = sqlx::query_as::<_, PersonRow>(
            r#"
            SELECT id, full_name, date_of_birth, created_at, updated_at
            FROM people
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Lists every person in insertion order
    pub async fn list(&self) -> Result<Vec<PersonRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, PersonRow>(
            r#"
            SELECT id, full_name, date_of_birth, created_at, updated_at
            FROM people
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Lists one page of people in insertion order
    pub async fn list_page(&self, limit: i64, offset: i64) -> Result<Vec<PersonRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, PersonRow>(
            r#"
            SELECT id, full_name, date_of_birth, created_at, updated_at
            FROM people
            ORDER BY created_at, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Overwrites a person's name and date of birth
    ///
    /// Returns `None` when no person has the id.
    pub async fn update(
        &self,
        id: Uuid,
        full_name: &str,
        date_of_birth: NaiveDate,
    ) -> Result<Option<PersonRow>, DatabaseError> {
        let row = sqlx::query_as::<_, PersonRow>(
            r#"
            UPDATE people
            SET full_name = $2, date_of_birth = $3, updated_at = now()
            WHERE id = $1
            RETURNING id, full_name, date_of_birth, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(full_name)
        .bind(date_of_birth)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}

/// Database row representation of a person
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PersonRow {
    pub id: Uuid,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new person
#[derive(Debug, Clone)]
pub struct NewPerson {
    pub id: Uuid,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
}
