// Storage errors
// Decision: Typed errors so callers can tell a duplicate apart from an outage

use thiserror::Error;

/// Postgres SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum StoreError {
    /// A user with this username already exists
    #[error("username already exists")]
    DuplicateUsername,

    /// Input rejected before it reached the store
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The backing store could not be reached or failed mid-query
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

impl StoreError {
    /// Map a sqlx error from a user insert, recognising the username unique index
    pub fn from_user_insert(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                StoreError::DuplicateUsername
            }
            _ => StoreError::Unavailable(err),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
