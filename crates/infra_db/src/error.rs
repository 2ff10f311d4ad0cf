//! Database error types
//!
//! This module defines the error types that can occur during database
//! operations and the two conversions the repositories rely on: classifying
//! raw `sqlx` errors into meaningful variants, and translating those into
//! the `PortError` currency at the port boundary.

use thiserror::Error;

use core_kernel::PortError;

/// One variant per failure class the repositories tell apart.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Unique constraint violation, duplicate roll numbers mostly.
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Check, not-null, or foreign key violation.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// A stored value would not parse back into its domain type.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Connection pool exhausted")]
    PoolExhausted,
}

impl DatabaseError {
    /// Standard `"<entity> with id .. not found"` message.
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound(format!("{} with id '{}' not found", entity, id))
    }

    /// Standard duplicate message naming the colliding field.
    pub fn duplicate(entity: &str, field: &str, value: impl std::fmt::Display) -> Self {
        DatabaseError::DuplicateEntry(format!(
            "{} with {} '{}' already exists",
            entity, field, value
        ))
    }

    /// A stored value that will not parse, named by column.
    pub fn bad_column(column: &str, detail: impl std::fmt::Display) -> Self {
        DatabaseError::SerializationError(format!("Column '{}': {}", column, detail))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound(_))
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DatabaseError::DuplicateEntry(_) | DatabaseError::ConstraintViolation(_)
        )
    }

    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted
        )
    }
}

/// SQLite reports all constraint failures through the driver error; the
/// portable `kind()` classification distinguishes unique violations from
/// the rest.
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("Record not found".to_string()),
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::Io(e) => DatabaseError::ConnectionFailed(e.to_string()),
            sqlx::Error::Database(db_err) => match db_err.kind() {
                sqlx::error::ErrorKind::UniqueViolation => {
                    DatabaseError::DuplicateEntry(db_err.message().to_string())
                }
                sqlx::error::ErrorKind::ForeignKeyViolation
                | sqlx::error::ErrorKind::NotNullViolation
                | sqlx::error::ErrorKind::CheckViolation => {
                    DatabaseError::ConstraintViolation(db_err.message().to_string())
                }
                _ => DatabaseError::QueryFailed(db_err.message().to_string()),
            },
            _ => DatabaseError::QueryFailed(error.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DatabaseError {
    fn from(error: sqlx::migrate::MigrateError) -> Self {
        DatabaseError::MigrationFailed(error.to_string())
    }
}

/// Translates database errors into the uniform port failure currency
///
/// Repositories construct entity-specific `PortError::NotFound` values
/// themselves; everything that falls through here is mapped by class.
impl From<DatabaseError> for PortError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound(message) => PortError::internal(message),
            DatabaseError::DuplicateEntry(message) => PortError::conflict(message),
            DatabaseError::ConstraintViolation(message) => PortError::conflict(message),
            DatabaseError::ConnectionFailed(message) => PortError::connection(message),
            DatabaseError::PoolExhausted => {
                PortError::connection("Connection pool exhausted".to_string())
            }
            other => PortError::internal(other.to_string()),
        }
    }
}
