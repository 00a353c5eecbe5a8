//! Errors raised by the shared database layer

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Failure modes of pool setup and schema management
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The pool could not connect to PostgreSQL
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// A migration failed to apply
    #[error("Database migration error: {0}")]
    Migration(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
