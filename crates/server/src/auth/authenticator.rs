// Username/password authentication against the credential store
// Decision: One store read per attempt; the identity is never mutated here
// Decision: Rejection reasons stay internal, callers must not expose them
// Decision: A username that matches no account is never logged

use std::sync::Arc;

use super::password::verify_password_blocking;
use crate::storage::{StorageBackend, StoreResult, UserRow};

/// Why an authentication attempt was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    UnknownUsername,
    WrongPassword,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::UnknownUsername => "unknown-username",
            RejectReason::WrongPassword => "wrong-password",
        }
    }
}

/// Outcome of an authentication attempt
#[derive(Debug, Clone)]
pub enum AuthResult {
    Authenticated(UserRow),
    Rejected(RejectReason),
}

/// Verifies presented credentials against stored identities
#[derive(Clone)]
pub struct Authenticator {
    db: Arc<StorageBackend>,
}

impl Authenticator {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    /// Look up `username` and check `password` against its stored hash.
    ///
    /// Returns `Err` only when the store itself fails. An unknown username is
    /// rejected without running a dummy hash, so its timing differs from the
    /// wrong-password path.
    pub async fn authenticate(&self, username: &str, password: &str) -> StoreResult<AuthResult> {
        let Some(user) = self.db.get_user_by_username(username).await? else {
            tracing::debug!(
                reason = RejectReason::UnknownUsername.as_str(),
                "Authentication rejected"
            );
            return Ok(AuthResult::Rejected(RejectReason::UnknownUsername));
        };

        let valid =
            verify_password_blocking(password.to_string(), user.password_hash.clone()).await;
        if !valid {
            tracing::debug!(
                username = %username,
                reason = RejectReason::WrongPassword.as_str(),
                "Authentication rejected"
            );
            return Ok(AuthResult::Rejected(RejectReason::WrongPassword));
        }

        tracing::debug!(username = %username, user_id = %user.id, "Authenticated");
        Ok(AuthResult::Authenticated(user))
    }
}
