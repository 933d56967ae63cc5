// Router assembly
// Decision: Health and the OpenAPI document stay unprefixed; API routes honour API_PREFIX

use axum::http::{header, HeaderValue, Method};
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api;
use crate::auth::{AuthConfig, AuthState};
use crate::openapi::ApiDoc;
use crate::services::{PostService, UserService};
use crate::storage::StorageBackend;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    storage: &'static str,
}

/// State for health endpoint
#[derive(Clone)]
struct HealthState {
    storage: &'static str,
}

async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.storage,
    })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the complete application router
pub fn build_app(
    db: Arc<StorageBackend>,
    auth_config: AuthConfig,
    api_prefix: &str,
    cors_origins: Vec<HeaderValue>,
) -> Router {
    let users_state = api::users::UsersState {
        service: Arc::new(UserService::new(db.clone())),
        auth_config: auth_config.clone(),
    };
    let posts_state = api::posts::AppState {
        service: Arc::new(PostService::new(db.clone())),
        auth: AuthState::new(auth_config, db.clone()),
    };
    let health_state = HealthState {
        storage: db.kind(),
    };

    let api_routes = Router::new()
        .merge(api::users::routes(users_state))
        .merge(api::posts::routes(posts_state));

    let app = Router::new()
        .route("/health", get(health).with_state(health_state))
        .route("/api-doc/openapi.json", get(openapi_json))
        .merge(build_router_with_prefix(api_routes, api_prefix));

    // Add CORS layer only if origins are configured
    let app = if cors_origins.is_empty() {
        app
    } else {
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(cors_origins))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
                .allow_credentials(true),
        )
    };

    app.layer(TraceLayer::new_for_http())
}

/// Build router with optional API prefix (extracted for testing)
fn build_router_with_prefix<S: Clone + Send + Sync + 'static>(
    api_routes: Router<S>,
    api_prefix: &str,
) -> Router<S> {
    if api_prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(api_prefix, api_routes)
    }
}
