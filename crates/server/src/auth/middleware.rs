// Authorization gate for privileged routes
// Decision: The gate is an extractor; a handler that takes `AuthUser` never
//           runs unless Basic authentication succeeded
// Decision: Every rejection produces the same 401, whatever the reason

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use uuid::Uuid;

use super::{
    authenticator::{AuthResult, Authenticator},
    config::AuthConfig,
    credentials::Credentials,
};
use crate::api::validation::MAX_PASSWORD_BYTES;
use crate::storage::{StorageBackend, UserRow};

/// Body of every 401 the gate produces
pub const UNAUTHORIZED_BODY: &str = "Unauthorized";

const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

/// Authentication error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Missing, malformed, or rejected credentials
    Unauthorized { challenge: String },
    /// The credential store failed
    Internal,
}

impl AuthError {
    pub fn unauthorized(config: &AuthConfig) -> Self {
        AuthError::Unauthorized {
            challenge: config.challenge(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::Unauthorized { challenge } => (
                StatusCode::UNAUTHORIZED,
                [
                    (header::WWW_AUTHENTICATE, challenge),
                    (
                        header::CONTENT_TYPE,
                        "text/plain; charset=utf-8".to_string(),
                    ),
                ],
                UNAUTHORIZED_BODY,
            )
                .into_response(),
            AuthError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
            }
        }
    }
}

/// Authenticated user context extracted from request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// User ID
    pub id: Uuid,
    /// Username the request authenticated as
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<UserRow> for AuthUser {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
        }
    }
}

/// Auth state shared across routes
#[derive(Clone)]
pub struct AuthState {
    pub config: AuthConfig,
    pub authenticator: Authenticator,
}

impl AuthState {
    pub fn new(config: AuthConfig, db: Arc<StorageBackend>) -> Self {
        Self {
            config,
            authenticator: Authenticator::new(db),
        }
    }
}

/// Extractor for authenticated user
/// This is required - returns 401 if not authenticated
#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        extract_auth_user(parts, &auth_state).await
    }
}

/// Run the gate: credentials → authenticator → user or rejection
async fn extract_auth_user(parts: &Parts, auth_state: &AuthState) -> Result<AuthUser, AuthError> {
    let Some(credentials) = Credentials::from_headers(&parts.headers) else {
        tracing::debug!(path = %parts.uri.path(), "Missing or malformed Basic credentials");
        return Err(AuthError::unauthorized(&auth_state.config));
    };

    // Oversized passwords never reach Argon2
    if credentials.password.len() > MAX_PASSWORD_BYTES {
        tracing::debug!(path = %parts.uri.path(), "Basic credentials exceed size limit");
        return Err(AuthError::unauthorized(&auth_state.config));
    }

    let result = auth_state
        .authenticator
        .authenticate(&credentials.username, &credentials.password)
        .await
        .map_err(|e| {
            tracing::error!("Failed to authenticate request: {}", e);
            AuthError::Internal
        })?;

    match result {
        AuthResult::Authenticated(user) => Ok(AuthUser::from(user)),
        AuthResult::Rejected(_) => Err(AuthError::unauthorized(&auth_state.config)),
    }
}
