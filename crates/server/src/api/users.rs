// Users API routes
// Decision: Registration is open; signup can be switched off with AUTH_DISABLE_SIGNUP
// Decision: Username problems are 422, password problems are 400

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use inkwell_core::{User, UserRecord};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::common::{internal_error, json_rejection, ApiError, ErrorResponse};
use super::validation::validate_registration;
use crate::auth::AuthConfig;
use crate::services::{RegistrationError, UserService};

/// App state for users routes
#[derive(Clone)]
pub struct UsersState {
    pub service: Arc<UserService>,
    pub auth_config: AuthConfig,
}

/// Request to register a new user
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    /// Unique login name; surrounding whitespace is trimmed
    pub username: Option<String>,
    /// Plaintext password, stored only as an Argon2id hash
    #[serde(default, deserialize_with = "string_or_none")]
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// A non-string password is treated as absent, so it is rejected with the
/// other password errors rather than as a body type error
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// Create users routes
pub fn routes(state: UsersState) -> Router {
    Router::new()
        .route("/users", post(register_user).get(list_users))
        .with_state(state)
}

/// POST /users - Register a new user
#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered", body = User),
        (status = 400, description = "Malformed body or missing password", body = ErrorResponse),
        (status = 403, description = "Signup disabled", body = ErrorResponse),
        (status = 422, description = "Invalid or duplicate username", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn register_user(
    State(state): State<UsersState>,
    payload: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    if !state.auth_config.signup_enabled() {
        return Err(
            ErrorResponse::new("Signup is disabled").into_response(StatusCode::FORBIDDEN)
        );
    }

    let Json(req) = payload.map_err(json_rejection)?;
    validate_registration(
        req.username.as_deref(),
        req.password.as_deref(),
        req.first_name.as_deref(),
        req.last_name.as_deref(),
    )?;

    let user = state
        .service
        .register(req)
        .await
        .map_err(registration_error)?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users - List registered users, newest first
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "List of users", body = Vec<UserRecord>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<UsersState>,
) -> Result<Json<Vec<UserRecord>>, ApiError> {
    let users = state
        .service
        .list()
        .await
        .map_err(|e| internal_error("Failed to list users", e))?;
    Ok(Json(users))
}

fn registration_error(err: RegistrationError) -> ApiError {
    match err {
        RegistrationError::MissingField("password") | RegistrationError::BlankField("password") => {
            tracing::warn!("Registration rejected: {}", err);
            ErrorResponse::new(err.to_string()).into_response(StatusCode::BAD_REQUEST)
        }
        RegistrationError::MissingField(_)
        | RegistrationError::BlankField(_)
        | RegistrationError::DuplicateUsername => {
            tracing::warn!("Registration rejected: {}", err);
            ErrorResponse::new(err.to_string()).into_response(StatusCode::UNPROCESSABLE_ENTITY)
        }
        RegistrationError::Store(e) => internal_error("Failed to create user", e),
        RegistrationError::Password(e) => internal_error("Failed to hash password", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageBackend;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app(config: AuthConfig) -> Router {
        let db = Arc::new(StorageBackend::in_memory());
        routes(UsersState {
            service: Arc::new(UserService::new(db)),
            auth_config: config,
        })
    }

    fn register(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/users")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_register_request_deserialize() {
        let req: RegisterUserRequest = serde_json::from_str(
            r#"{"username": "bob", "password": "secret", "firstName": "Bob"}"#,
        )
        .unwrap();
        assert_eq!(req.username.as_deref(), Some("bob"));
        assert_eq!(req.first_name.as_deref(), Some("Bob"));
        assert_eq!(req.last_name, None);

        let req: RegisterUserRequest =
            serde_json::from_str(r#"{"username": "bob", "password": 42}"#).unwrap();
        assert_eq!(req.password, None);

        let req: RegisterUserRequest = serde_json::from_str(r#"{"username": "bob"}"#).unwrap();
        assert_eq!(req.password, None);
    }

    #[tokio::test]
    async fn test_register_returns_public_fields() {
        let response = app(AuthConfig::default())
            .oneshot(register(
                r#"{"username": "bob", "password": "secret", "firstName": "Bob", "lastName": "Builder"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = json_body(response).await;
        assert_eq!(
            json,
            serde_json::json!({"username": "bob", "firstName": "Bob", "lastName": "Builder"})
        );
    }

    #[tokio::test]
    async fn test_register_status_codes() {
        let cases = [
            (r#"{"password": "secret"}"#, StatusCode::UNPROCESSABLE_ENTITY),
            (r#"{"username": "  ", "password": "secret"}"#, StatusCode::UNPROCESSABLE_ENTITY),
            (r#"{"username": 42, "password": "secret"}"#, StatusCode::UNPROCESSABLE_ENTITY),
            (r#"{"username": "bob"}"#, StatusCode::BAD_REQUEST),
            (r#"{"username": "bob", "password": " "}"#, StatusCode::BAD_REQUEST),
            (r#"{"username": "bob", "password": 42}"#, StatusCode::BAD_REQUEST),
            (r#"{"username": "bob", "password": null}"#, StatusCode::BAD_REQUEST),
            (r#"{"username": "bob", "password": ["secret"]}"#, StatusCode::BAD_REQUEST),
            ("not json", StatusCode::BAD_REQUEST),
        ];

        let app = app(AuthConfig::default());
        for (body, expected) in cases {
            let response = app.clone().oneshot(register(body)).await.unwrap();
            assert_eq!(response.status(), expected, "body: {}", body);
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_is_422() {
        let app = app(AuthConfig::default());
        let body = r#"{"username": "bob", "password": "secret"}"#;

        let first = app.clone().oneshot(register(body)).await.unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = app.oneshot(register(body)).await.unwrap();
        assert_eq!(second.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            json_body(second).await,
            serde_json::json!({"error": "Username already taken"})
        );
    }

    #[tokio::test]
    async fn test_signup_disabled() {
        let config = AuthConfig {
            disable_signup: true,
            ..Default::default()
        };
        let response = app(config)
            .oneshot(register(r#"{"username": "bob", "password": "secret"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_list_users_exposes_hash() {
        let app = app(AuthConfig::default());
        app.clone()
            .oneshot(register(r#"{"username": "bob", "password": "secret"}"#))
            .await
            .unwrap();

        let response = app
            .oneshot(Request::get("/users").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        let users = json.as_array().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["username"], "bob");
        let hash = users[0]["passwordHash"].as_str().unwrap();
        assert_ne!(hash, "secret");
        assert!(hash.starts_with("$argon2id$"));
    }
}
