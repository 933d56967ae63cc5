// Input validation for public APIs
//
// Last-resort validation limits to guard the server from abuse.
// These are hard limits, not configurable. The password cap also applies to
// Basic credentials at the auth gate, so Argon2 never sees oversized input.

use super::common::ErrorResponse;
use axum::http::StatusCode;
use axum::Json;

// =============================================================================
// Input Size Limits
// =============================================================================

/// Maximum size for a username.
pub const MAX_USERNAME_BYTES: usize = 256;

/// Maximum size for first/last name fields.
pub const MAX_NAME_BYTES: usize = 256;

/// Maximum size for a password.
pub const MAX_PASSWORD_BYTES: usize = 1024; // 1 KB

/// Maximum size for a post title.
pub const MAX_POST_TITLE_BYTES: usize = 2 * 1024; // 2 KB

/// Maximum size for a post body.
pub const MAX_POST_CONTENT_BYTES: usize = 1024 * 1024; // 1 MB

/// Generic validation error message returned to clients.
/// Intentionally vague to avoid leaking which field exceeded limits.
pub const VALIDATION_ERROR_MESSAGE: &str = "Input exceeds allowed limits";

// =============================================================================
// Validation Functions
// =============================================================================

/// Validation error - returns generic message to avoid leaking details
#[derive(Debug)]
pub struct ValidationError;

impl From<ValidationError> for (StatusCode, Json<ErrorResponse>) {
    fn from(_: ValidationError) -> Self {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(VALIDATION_ERROR_MESSAGE)),
        )
    }
}

fn check(field: &str, value: Option<&str>, max: usize) -> Result<(), ValidationError> {
    if let Some(value) = value {
        if value.len() > max {
            tracing::warn!(
                "{} exceeds limit: {} bytes (max: {})",
                field,
                value.len(),
                max
            );
            return Err(ValidationError);
        }
    }
    Ok(())
}

/// Validate registration field sizes
pub fn validate_registration(
    username: Option<&str>,
    password: Option<&str>,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Result<(), ValidationError> {
    check("Username", username, MAX_USERNAME_BYTES)?;
    check("Password", password, MAX_PASSWORD_BYTES)?;
    check("First name", first_name, MAX_NAME_BYTES)?;
    check("Last name", last_name, MAX_NAME_BYTES)?;
    Ok(())
}

/// Validate post field sizes
pub fn validate_post(
    title: Option<&str>,
    content: Option<&str>,
    author_first_name: Option<&str>,
    author_last_name: Option<&str>,
) -> Result<(), ValidationError> {
    check("Post title", title, MAX_POST_TITLE_BYTES)?;
    check("Post content", content, MAX_POST_CONTENT_BYTES)?;
    check("Author first name", author_first_name, MAX_NAME_BYTES)?;
    check("Author last name", author_last_name, MAX_NAME_BYTES)?;
    Ok(())
}
