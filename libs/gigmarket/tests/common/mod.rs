#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use serde_json::{Value, json};
use tower::ServiceExt;

use gigmarket::config::AppConfig;
use gigmarket::infra::migrations::Migrator;
use gigmarket::router;
use gigmarket::state::AppState;

/// Fresh app over an in-memory sqlite database. One connection only, so
/// every query sees the same memory database.
pub async fn test_app() -> Router {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    let config = AppConfig::default();
    router::build(AppState::new(db, &config))
}

pub fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("build request"),
        None => builder.body(Body::empty()).expect("build request"),
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.expect("dispatch request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("parse json body")
    };
    (status, body)
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, request(Method::GET, uri, token, None)).await
}

pub async fn post(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    send(app, request(Method::POST, uri, token, Some(body))).await
}

pub async fn patch(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    send(app, request(Method::PATCH, uri, token, Some(body))).await
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, request(Method::DELETE, uri, token, None)).await
}

/// Register a user and hand back `(token, user_id)`.
pub async fn register(app: &Router, username: &str, role: &str) -> (String, String) {
    let (status, body) = post(
        app,
        "/api/register",
        None,
        json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "secret123",
            "repeated_password": "secret123",
            "type": role,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
    (
        body["token"].as_str().expect("token").to_owned(),
        body["user_id"].as_str().expect("user_id").to_owned(),
    )
}

/// A well-formed three-tier details array for offer creation.
pub fn three_tiers() -> Value {
    json!([
        {
            "title": "Basic package",
            "revisions": 2,
            "delivery_time_in_days": 5,
            "price": 50.0,
            "features": ["Logo"],
            "offer_type": "basic",
        },
        {
            "title": "Standard package",
            "revisions": 5,
            "delivery_time_in_days": 7,
            "price": 100.0,
            "features": ["Logo", "Flyer"],
            "offer_type": "standard",
        },
        {
            "title": "Premium package",
            "revisions": 10,
            "delivery_time_in_days": 10,
            "price": 200.0,
            "features": ["Logo", "Flyer", "Website"],
            "offer_type": "premium",
        },
    ])
}

/// Create an offer as the given business user; returns the response body.
pub async fn create_offer(app: &Router, token: &str, title: &str) -> Value {
    let (status, body) = post(
        app,
        "/api/offers",
        Some(token),
        json!({
            "title": title,
            "image": null,
            "description": "Everything around your brand",
            "details": three_tiers(),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "offer creation failed: {body}");
    body
}
