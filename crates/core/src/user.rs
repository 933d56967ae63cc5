// User domain types
//
// `User` is the public view returned by registration (no credentials).
// `UserRecord` is the listing view, which carries the stored password hash
// the same way the user collection exposes it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Registered user without any credential material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique username used for Basic authentication.
    #[cfg_attr(feature = "openapi", schema(example = "xav3x"))]
    pub username: String,
    /// Optional first name (empty when not provided).
    pub first_name: String,
    /// Optional last name (empty when not provided).
    pub last_name: String,
}

/// Stored user as listed by `GET /users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Argon2id PHC string; never the plaintext password.
    pub password_hash: String,
    pub created: DateTime<Utc>,
}
