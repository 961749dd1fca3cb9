//! Port adapters backed by the repository layer

pub mod registry;

pub use registry::PostgresRegistryAdapter;
