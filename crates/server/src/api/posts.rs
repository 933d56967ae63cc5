// Post CRUD HTTP routes
// Decision: Reads are public; create, update and delete sit behind the Basic auth gate
// Decision: DELETE answers 204 whether or not the post existed

use axum::{
    extract::{rejection::JsonRejection, FromRef, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use inkwell_core::{Author, Post};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::common::{internal_error, json_rejection, ApiError, ErrorResponse};
use super::validation::validate_post;
use crate::auth::{AuthState, AuthUser};
use crate::services::{PostError, PostService};

/// Request to create a new post
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    #[schema(example = "Hello, world")]
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<Author>,
}

/// Request to update a post. Only provided fields will be updated.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdatePostRequest {
    /// Must match the id in the path when present.
    pub id: Option<Uuid>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<Author>,
}

/// App state for post routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PostService>,
    pub auth: AuthState,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(input: &AppState) -> Self {
        input.auth.clone()
    }
}

/// Create post routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/posts", post(create_post).get(list_posts))
        .route(
            "/posts/:post_id",
            get(get_post).put(update_post).delete(delete_post),
        )
        .with_state(state)
}

/// POST /posts - Create a new post
#[utoipa::path(
    post,
    path = "/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 400, description = "Missing field or malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("basic_auth" = [])),
    tag = "posts"
)]
pub async fn create_post(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let Json(req) = payload.map_err(json_rejection)?;
    validate_post(
        req.title.as_deref(),
        req.content.as_deref(),
        req.author.as_ref().map(|a| a.first_name.as_str()),
        req.author.as_ref().map(|a| a.last_name.as_str()),
    )?;

    let post = state.service.create(req).await.map_err(post_error)?;

    tracing::info!(username = %user.username, post_id = %post.id, "Post created");
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /posts - List posts, newest first
#[utoipa::path(
    get,
    path = "/posts",
    responses(
        (status = 200, description = "List of posts", body = Vec<Post>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "posts"
)]
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = state.service.list().await.map_err(post_error)?;
    Ok(Json(posts))
}

/// GET /posts/{post_id} - Get post by ID
#[utoipa::path(
    get,
    path = "/posts/{post_id}",
    params(
        ("post_id" = Uuid, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post found", body = Post),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "posts"
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Post>, ApiError> {
    match state.service.get(post_id).await.map_err(post_error)? {
        Some(post) => Ok(Json(post)),
        None => Err(not_found()),
    }
}

/// PUT /posts/{post_id} - Update title, content and author
#[utoipa::path(
    put,
    path = "/posts/{post_id}",
    params(
        ("post_id" = Uuid, Path, description = "Post ID")
    ),
    request_body = UpdatePostRequest,
    responses(
        (status = 201, description = "Post updated", body = Post),
        (status = 400, description = "Blank field or body id does not match path id", body = ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("basic_auth" = [])),
    tag = "posts"
)]
pub async fn update_post(
    State(state): State<AppState>,
    user: AuthUser,
    Path(post_id): Path<Uuid>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let Json(req) = payload.map_err(json_rejection)?;
    validate_post(
        req.title.as_deref(),
        req.content.as_deref(),
        req.author.as_ref().map(|a| a.first_name.as_str()),
        req.author.as_ref().map(|a| a.last_name.as_str()),
    )?;

    match state
        .service
        .update(post_id, req)
        .await
        .map_err(post_error)?
    {
        Some(post) => {
            tracing::info!(username = %user.username, post_id = %post.id, "Post updated");
            Ok((StatusCode::CREATED, Json(post)))
        }
        None => Err(not_found()),
    }
}

/// DELETE /posts/{post_id} - Delete a post
#[utoipa::path(
    delete,
    path = "/posts/{post_id}",
    params(
        ("post_id" = Uuid, Path, description = "Post ID")
    ),
    responses(
        (status = 204, description = "Post deleted or already absent"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("basic_auth" = [])),
    tag = "posts"
)]
pub async fn delete_post(
    State(state): State<AppState>,
    user: AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let existed = state.service.delete(post_id).await.map_err(post_error)?;
    tracing::info!(username = %user.username, post_id = %post_id, existed, "Post deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn not_found() -> ApiError {
    ErrorResponse::new("Post not found").into_response(StatusCode::NOT_FOUND)
}

fn post_error(err: PostError) -> ApiError {
    match err {
        PostError::MissingField(_) | PostError::BlankField(_) | PostError::IdMismatch { .. } => {
            tracing::warn!("Post request rejected: {}", err);
            ErrorResponse::new(err.to_string()).into_response(StatusCode::BAD_REQUEST)
        }
        PostError::Store(e) => internal_error("Post storage failed", e),
    }
}
