//! Database error types
//!
//! Errors raised by the repository layer, with sqlx errors classified by
//! PostgreSQL error code so callers can tell constraint violations apart
//! from plain query failures.

use thiserror::Error;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Entity not found in database
    #[error("{entity} with id '{id}' not found")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation
    #[error("Duplicate entry: {message}")]
    DuplicateEntry {
        /// Name of the violated constraint or index, when the driver reports it
        constraint: Option<String>,
        message: String,
    },

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Migration error
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Pool exhaustion - no available connections
    #[error("Connection pool exhausted")]
    PoolExhausted,
}

impl DatabaseError {
    /// Creates a not found error for a specific entity type and identifier
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Checks if this error indicates a record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound { .. })
    }

    /// Checks if this error is a unique violation of the named constraint
    pub fn violates_constraint(&self, name: &str) -> bool {
        matches!(
            self,
            DatabaseError::DuplicateEntry { constraint: Some(c), .. } if c == name
        )
    }

    /// Checks if this error is a connection-related issue
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted
        )
    }
}

/// Classifies sqlx errors by PostgreSQL error code
///
/// https://www.postgresql.org/docs/current/errcodes-appendix.html
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => DatabaseError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::Io(e) => DatabaseError::ConnectionFailed(e.to_string()),
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some("23505") => DatabaseError::DuplicateEntry {
                    constraint: db_err.constraint().map(str::to_string),
                    message: db_err.message().to_string(),
                },
                Some("23503") => DatabaseError::ForeignKeyViolation(db_err.message().to_string()),
                Some("23514") => DatabaseError::ConstraintViolation(db_err.message().to_string()),
                _ => DatabaseError::QueryFailed(db_err.message().to_string()),
            },
            _ => DatabaseError::QueryFailed(error.to_string()),
        }
    }
}
