// OpenAPI specification generation
//
// This module defines the OpenAPI spec for the Inkwell API.
// It is served by the API server at /api-doc/openapi.json
// and written out by the export-openapi binary.

use crate::api;
use crate::api::ErrorResponse;
use inkwell_core::{Author, Post, User, UserRecord};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the Inkwell API
#[derive(OpenApi)]
#[openapi(
    paths(
        api::users::register_user,
        api::users::list_users,
        api::posts::create_post,
        api::posts::list_posts,
        api::posts::get_post,
        api::posts::update_post,
        api::posts::delete_post,
    ),
    components(
        schemas(
            User, UserRecord,
            Post, Author,
            api::users::RegisterUserRequest,
            api::posts::CreatePostRequest, api::posts::UpdatePostRequest,
            ErrorResponse,
        )
    ),
    modifiers(&BasicAuthScheme),
    tags(
        (name = "users", description = "User registration and listing"),
        (name = "posts", description = "Blog post endpoints")
    ),
    info(
        title = "Inkwell API",
        description = "Blog API with HTTP Basic authentication",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

/// Registers the `basic_auth` scheme referenced by privileged routes
struct BasicAuthScheme;

impl Modify for BasicAuthScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
            );
        }
    }
}

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> Result<String, serde_json::Error> {
        Self::openapi().to_pretty_json()
    }
}
