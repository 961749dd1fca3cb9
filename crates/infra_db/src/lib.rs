//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL persistence for the person registry:
//! connection pooling, embedded migrations, repositories, and the adapter
//! implementing the domain's storage ports.
//!
//! # Architecture
//!
//! The repository layer speaks rows and SQL; the adapter layer translates
//! between rows and domain models and between database errors and port
//! errors. The domain never sees a `sqlx` type.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool_from_url, run_migrations, PostgresRegistryAdapter};
//!
//! let pool = create_pool_from_url("postgres://localhost/person_registry").await?;
//! run_migrations(&pool).await?;
//! let adapter = PostgresRegistryAdapter::new(pool);
//! ```

pub mod adapters;
pub mod error;
pub mod pool;
pub mod repositories;

pub use adapters::PostgresRegistryAdapter;
pub use error::DatabaseError;
pub use pool::{
    create_pool, create_pool_from_url, run_migrations, DatabaseConfig, DatabasePool,
};
