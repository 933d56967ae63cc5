// User service: registration and listing
// Decision: Validate and normalise before touching the store; hash off the request thread

use crate::auth::password::{hash_password_blocking, PasswordError};
use crate::storage::{models::CreateUserRow, StorageBackend, StoreError};
use inkwell_core::{User, UserRecord};
use std::sync::Arc;
use thiserror::Error;

use crate::api::users::RegisterUserRequest;

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Field must not be blank: {0}")]
    BlankField(&'static str),

    #[error("Username already taken")]
    DuplicateUsername,

    #[error(transparent)]
    Store(StoreError),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl From<StoreError> for RegistrationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername => RegistrationError::DuplicateUsername,
            StoreError::InvalidInput(_) => RegistrationError::BlankField("username"),
            other => RegistrationError::Store(other),
        }
    }
}

pub struct UserService {
    db: Arc<StorageBackend>,
}

impl UserService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    /// Register a new user.
    ///
    /// Username and display names are trimmed; the password is hashed as given
    /// but must contain something other than whitespace.
    pub async fn register(&self, req: RegisterUserRequest) -> Result<User, RegistrationError> {
        let username = req
            .username
            .as_deref()
            .ok_or(RegistrationError::MissingField("username"))?
            .trim()
            .to_string();
        if username.is_empty() {
            return Err(RegistrationError::BlankField("username"));
        }

        let password = req
            .password
            .ok_or(RegistrationError::MissingField("password"))?;
        if password.trim().is_empty() {
            return Err(RegistrationError::BlankField("password"));
        }

        let password_hash = hash_password_blocking(password).await?;

        let input = CreateUserRow {
            username,
            first_name: req.first_name.unwrap_or_default().trim().to_string(),
            last_name: req.last_name.unwrap_or_default().trim().to_string(),
            password_hash,
        };
        let row = self.db.create_user(input).await?;

        tracing::info!(username = %row.username, user_id = %row.id, "User registered");
        Ok(row.to_user())
    }

    pub async fn list(&self) -> Result<Vec<UserRecord>, StoreError> {
        let rows = self.db.list_users().await?;
        Ok(rows.into_iter().map(UserRecord::from).collect())
    }
}
