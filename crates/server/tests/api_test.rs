// Integration tests for the Inkwell API
// Run with: cargo test -p inkwell-server --test api_test
// In-process against the in-memory store; no database or listener needed

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use http_body_util::BodyExt;
use inkwell_server::auth::AuthConfig;
use inkwell_server::build_app;
use inkwell_server::storage::StorageBackend;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> Router {
    build_app(
        Arc::new(StorageBackend::in_memory()),
        AuthConfig::default(),
        "",
        Vec::new(),
    )
}

fn basic(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
}

fn request(method: &str, uri: &str, auth: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Status, sorted headers, and body bytes
async fn snapshot(response: Response) -> (StatusCode, Vec<(String, String)>, Vec<u8>) {
    let status = response.status();
    let mut headers: Vec<_> = response
        .headers()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap().to_string()))
        .collect();
    headers.sort();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, body.to_vec())
}

async fn register(app: &Router, username: &str, password: &str) -> Response {
    send(
        app,
        request(
            "POST",
            "/users",
            None,
            Some(json!({"username": username, "password": password})),
        ),
    )
    .await
}

fn new_post() -> Value {
    json!({
        "title": "Hello",
        "content": "First post",
        "author": {"firstName": "Xavier", "lastName": "X"}
    })
}

#[tokio::test]
async fn test_registration_and_listing() {
    let app = test_app();

    println!("Step 1: Registering bob...");
    let response = register(&app, "bob", "secret").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let user = json_body(response).await;
    assert_eq!(user["username"], "bob");
    assert!(user.get("passwordHash").is_none());

    println!("Step 2: Listing users...");
    let response = send(&app, request("GET", "/users", None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let users = json_body(response).await;
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["username"], "bob");
    assert_ne!(users[0]["passwordHash"], "secret");

    println!("Step 3: Registering bob again...");
    let response = register(&app, " bob ", "other").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = send(&app, request("GET", "/users", None, None)).await;
    let after = json_body(response).await;
    assert_eq!(after.as_array().unwrap().len(), 1);
    assert_eq!(after[0]["passwordHash"], users[0]["passwordHash"]);
}

#[tokio::test]
async fn test_authenticated_post_lifecycle() {
    let app = test_app();
    let auth = basic("xav3x", "123456");

    assert_eq!(
        register(&app, "xav3x", "123456").await.status(),
        StatusCode::CREATED
    );

    println!("Step 1: Creating post...");
    let response = send(&app, request("POST", "/posts", Some(&auth), Some(new_post()))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let post = json_body(response).await;
    let id = post["id"].as_str().unwrap().to_string();
    assert_eq!(post["author"], "Xavier X");

    println!("Step 2: Updating post...");
    let response = send(
        &app,
        request(
            "PUT",
            &format!("/posts/{}", id),
            Some(&auth),
            Some(json!({"id": id, "title": "cats cats cats"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await["title"], "cats cats cats");

    println!("Step 3: Deleting post...");
    let response = send(
        &app,
        request("DELETE", &format!("/posts/{}", id), Some(&auth), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, request("GET", "/posts", None, None)).await;
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn test_bad_credentials_rejected_identically() {
    let app = test_app();
    register(&app, "xav3x", "123456").await;

    let response = send(
        &app,
        request("POST", "/posts", Some(&basic("xav3x", "123456")), Some(new_post())),
    )
    .await;
    let post = json_body(response).await;
    let uri = format!("/posts/{}", post["id"].as_str().unwrap());

    let attempts = [
        ("POST", "/posts".to_string(), Some(new_post())),
        ("PUT", uri.clone(), Some(json!({"title": "hijacked"}))),
        ("DELETE", uri.clone(), None),
    ];

    for (method, path, body) in attempts {
        let wrong_password = snapshot(
            send(
                &app,
                request(method, &path, Some(&basic("xav3x", "WRONGPASS")), body.clone()),
            )
            .await,
        )
        .await;
        let wrong_user = snapshot(
            send(
                &app,
                request(method, &path, Some(&basic("wronguser", "123456")), body.clone()),
            )
            .await,
        )
        .await;
        let missing = snapshot(send(&app, request(method, &path, None, body)).await).await;

        assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED, "{} {}", method, path);
        assert_eq!(wrong_password.2, b"Unauthorized");
        assert!(wrong_password
            .1
            .contains(&("www-authenticate".to_string(), "Basic realm=\"inkwell\"".to_string())));
        assert_eq!(wrong_password, wrong_user);
        assert_eq!(wrong_password, missing);
    }

    println!("Verifying nothing changed...");
    let response = send(&app, request("GET", "/posts", None, None)).await;
    let posts = json_body(response).await;
    let posts = posts.as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["title"], "Hello");
}

#[tokio::test]
async fn test_public_reads() {
    let app = test_app();

    let response = send(&app, request("GET", "/posts", None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));

    let response = send(
        &app,
        request(
            "GET",
            "/posts/0192f5e0-0000-7000-8000-000000000000",
            None,
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, request("GET", "/posts/not-a-uuid", None, None)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
